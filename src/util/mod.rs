pub mod logging;

pub struct DurationUtils;

impl DurationUtils {
    pub fn minutes_to_ms(minutes: u32) -> u64 {
        minutes as u64 * 60_000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minutes_convert_to_milliseconds() {
        assert_eq!(DurationUtils::minutes_to_ms(0), 0);
        assert_eq!(DurationUtils::minutes_to_ms(1), 60_000);
        assert_eq!(DurationUtils::minutes_to_ms(25), 1_500_000);
    }
}
