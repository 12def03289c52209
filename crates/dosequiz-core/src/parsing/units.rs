/// Reduce a per-kilogram unit label to its base unit.
///
/// `mg/kgKG` becomes `mg`. Labels that do not end in `KG`, including
/// rate units such as `mg/kgKG/h`, are returned unchanged.
pub fn normalize_unit(unit: &str) -> String {
    if unit.ends_with("KG") {
        if let Some((base, _)) = unit.split_once('/') {
            return base.to_string();
        }
    }
    unit.to_string()
}
