use crate::config::DateLocale;
use crate::models::{HarvestRecord, Summary};
use chrono::NaiveDate;

pub const REPORT_TITLE: &str = "RELATÓRIO DE COLHEITA DE OVOS";

/// Plain-text harvest report. Callers make sure `records` is non-empty.
pub fn render_report(records: &[HarvestRecord], summary: &Summary) -> String {
    let mut out = format!(
        "{REPORT_TITLE}\n\
         ================================\n\n\
         Total de dias registrados: {}\n\
         Total de ovos coletados: {}\n\
         Média diária: {:.2} ovos\n\n\
         DETALHES POR DIA:\n\
         -----------------\n",
        records.len(),
        summary.total,
        summary.average,
    );

    for record in records {
        out.push_str(&format!(
            "Dia {} ({}): {} ovos\n",
            record.day, record.date, record.quantity
        ));
    }

    out
}

/// `colheita-ovos-05-01-2026.txt` for pt-BR; separators never reach the filename.
pub fn report_filename(locale: DateLocale, date: NaiveDate) -> String {
    let stamp = locale.format(date).replace(['/', '\\'], "-");
    format!("colheita-ovos-{stamp}.txt")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_lists_every_record() {
        let records = vec![
            HarvestRecord {
                day: 1,
                quantity: 10.0,
                date: "05/01/2026".to_string(),
            },
            HarvestRecord {
                day: 2,
                quantity: 7.5,
                date: "06/01/2026".to_string(),
            },
        ];
        let summary = Summary {
            average: 8.75,
            total: 17.5,
        };

        let expected = "RELATÓRIO DE COLHEITA DE OVOS\n\
================================\n\
\n\
Total de dias registrados: 2\n\
Total de ovos coletados: 17.5\n\
Média diária: 8.75 ovos\n\
\n\
DETALHES POR DIA:\n\
-----------------\n\
Dia 1 (05/01/2026): 10 ovos\n\
Dia 2 (06/01/2026): 7.5 ovos\n";
        assert_eq!(render_report(&records, &summary), expected);
    }

    #[test]
    fn filename_replaces_separators() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!(
            report_filename(DateLocale::PtBr, date),
            "colheita-ovos-19-10-2026.txt"
        );
        assert_eq!(
            report_filename(DateLocale::EnUs, date),
            "colheita-ovos-10-19-2026.txt"
        );
        assert_eq!(
            report_filename(DateLocale::Iso, date),
            "colheita-ovos-2026-10-19.txt"
        );
    }
}
