pub fn unrelated() -> u32 {
    let mut total = 0;
    for i in 0..10 {
        total += i;
    }
    total
}

/// Somebody else's defaults.
// @AlertDefaults(team = platform, severity = page)
pub fn more() {}
