//! Major/minor version to Java SE release mapping (`spec.md` §4.4).

const TABLE: &[(u16, u16, &str)] = &[
    (45, 3, "Java SE base (< 1.5)"),
    (49, 0, "Java SE 1.5"),
    (50, 0, "Java SE 1.6"),
    (51, 0, "Java SE 1.7"),
    (52, 0, "Java SE 1.8"),
    (53, 0, "Java SE 1.9"),
    (54, 0, "Java SE 10"),
    (55, 0, "Java SE 11"),
    (56, 0, "Java SE 12"),
    (57, 0, "Java SE 13"),
    (58, 0, "Java SE 14"),
    (59, 0, "Java SE 15"),
    (60, 0, "Java SE 16"),
];

/// "At least this version tuple, last satisfied row wins" per `spec.md`
/// §4.4: each row is a floor, and rows are checked in ascending order so
/// the highest floor the file clears determines the name. Anything past
/// the final row (major/minor newer than 60.0) is explicitly unmapped.
pub fn version(major: u16, minor: u16) -> &'static str {
    if (major, minor) > (60, 0) {
        return "unknown";
    }
    let mut resolved = "unknown";
    for &(floor_major, floor_minor, name) in TABLE {
        if (major, minor) >= (floor_major, floor_minor) {
            resolved = name;
        }
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_a_major_52_minor_0_is_java_8() {
        assert_eq!(version(52, 0), "Java SE 1.8");
    }

    #[test]
    fn below_base_floor_is_unknown() {
        assert_eq!(version(44, 0), "unknown");
    }

    #[test]
    fn above_ceiling_is_unknown() {
        assert_eq!(version(61, 0), "unknown");
    }

    #[test]
    fn exact_ceiling_is_java_16() {
        assert_eq!(version(60, 0), "Java SE 16");
    }
}
