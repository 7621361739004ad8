quantity!(Hours, suffix: "h", precision: 2);

impl Hours {
    pub fn from_minutes(minutes: u32) -> Self {
        Self(f64::from(minutes) / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_from_minutes() {
        assert_abs_diff_eq!(Hours::from_minutes(15).0, 0.25);
        assert_abs_diff_eq!(Hours::from_minutes(60).0, 1.0);
    }
}
