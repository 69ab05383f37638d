use chrono::{DateTime, FixedOffset, Utc};

/// Asia/Kolkata has no DST, a fixed offset is exact.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;
const SUBMITTED_AT_FORMAT: &str = "%-d/%-m/%Y, %-I:%M:%S %P";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CareerApplication {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) position: String,
    pub(crate) linkedin: Option<String>,
    pub(crate) portfolio: Option<String>,
    pub(crate) resume: String,
    pub(crate) message: String,
}

impl CareerApplication {
    /// Row in sheet column order; missing links become empty cells.
    pub(crate) fn into_row(self, submitted_at: DateTime<Utc>) -> Vec<String> {
        vec![
            format_submitted_at(submitted_at),
            self.name,
            self.email,
            self.phone,
            self.position,
            self.linkedin.unwrap_or_default(),
            self.portfolio.unwrap_or_default(),
            self.resume,
            self.message,
        ]
    }
}

pub(crate) fn format_submitted_at(at: DateTime<Utc>) -> String {
    match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(ist) => at.with_timezone(&ist).format(SUBMITTED_AT_FORMAT).to_string(),
        None => at.format(SUBMITTED_AT_FORMAT).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn submitted_at_is_kolkata_local_time() {
        let at = Utc.with_ymd_and_hms(2025, 1, 4, 21, 15, 7).unwrap();
        assert_eq!(format_submitted_at(at), "5/1/2025, 2:45:07 am");

        let at = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
        assert_eq!(format_submitted_at(at), "10/3/2025, 2:30:00 pm");
    }

    #[test]
    fn into_row_fills_missing_links_with_empty_cells() {
        let application = CareerApplication {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: "+91 90000 00000".to_string(),
            position: "SEO Specialist".to_string(),
            linkedin: None,
            portfolio: Some("https://ann.dev".to_string()),
            resume: "https://drive.example.com/cv".to_string(),
            message: "Hi".to_string(),
        };

        let row = application.into_row(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(row.len(), 9);
        assert_eq!(row[0], "1/1/2025, 5:30:00 am");
        assert_eq!(row[5], "");
        assert_eq!(row[6], "https://ann.dev");
    }
}
