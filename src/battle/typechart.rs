use schema::NutritionalType;

/// Combined effectiveness of an attacking element against a (possibly dual
/// typed) defender. A hard immunity on either defending type zeroes the whole
/// strike; otherwise per-type contributions multiply, so the result lands in
/// {0.25, 0.5, 1.0, 2.0, 4.0}.
pub fn type_multiplier(attacking: NutritionalType, defender_types: &[NutritionalType]) -> f64 {
    if defender_types
        .iter()
        .any(|&defending| NutritionalType::effectiveness(attacking, defending) == 0.0)
    {
        return 0.0;
    }
    defender_types
        .iter()
        .map(|&defending| NutritionalType::effectiveness(attacking, defending))
        .product()
}

/// Soft-immunity accuracy modifier: attacks into a poor matchup land at 60%
/// of their nominal accuracy. One poor matchup is enough; they do not stack.
pub fn type_accuracy_modifier(
    attacking: NutritionalType,
    defender_types: &[NutritionalType],
) -> f64 {
    if defender_types
        .iter()
        .any(|&defending| NutritionalType::is_poor_matchup(attacking, defending))
    {
        0.6
    } else {
        1.0
    }
}
