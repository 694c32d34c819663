use crate::models::{HarvestRecord, Summary};

pub fn summarize(records: &[HarvestRecord]) -> Summary {
    if records.is_empty() {
        return Summary::default();
    }

    let total: f64 = records.iter().map(|record| record.quantity).sum();
    let average = round_to_cents(total / records.len() as f64);

    Summary { average, total }
}

fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(day: u32, quantity: f64) -> HarvestRecord {
        HarvestRecord {
            day,
            quantity,
            date: "05/01/2026".to_string(),
        }
    }

    #[test]
    fn empty_summary_is_zero() {
        let summary = summarize(&[]);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.total, 0.0);
    }

    #[test]
    fn average_rounds_to_two_decimals() {
        let records = vec![record(1, 1.0), record(2, 1.0), record(3, 2.0)];
        let summary = summarize(&records);
        assert_eq!(summary.total, 4.0);
        assert_eq!(summary.average, 1.33);
    }

    #[test]
    fn total_keeps_fractions() {
        let records = vec![record(1, 2.5), record(2, 4.0)];
        let summary = summarize(&records);
        assert_eq!(summary.total, 6.5);
        assert_eq!(summary.average, 3.25);
    }
}
