/// Hands out entry ids derived from creation time, bumped past the last id so
/// two entries created in the same millisecond never share one.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<i64>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Continues after the largest id already present in the ledger.
    pub fn seeded(last: Option<i64>) -> Self {
        Self { last }
    }

    pub fn next(&mut self, now_millis: i64) -> i64 {
        let id = match self.last {
            Some(last) if last >= now_millis => last + 1,
            _ => now_millis,
        };
        self.last = Some(id);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_clock_when_it_moved_forward() {
        let mut ids = IdGenerator::new();
        assert_eq!(ids.next(100), 100);
        assert_eq!(ids.next(250), 250);
    }

    #[test]
    fn bumps_on_same_millisecond() {
        let mut ids = IdGenerator::seeded(Some(100));
        assert_eq!(ids.next(100), 101);
        assert_eq!(ids.next(100), 102);
        assert_eq!(ids.next(90), 103);
    }
}
