use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::data::sheet::{SheetError, SheetSink};
use crate::domain::career::CareerApplication;

pub(crate) struct CareersService<S: SheetSink + ?Sized> {
    sink: Box<S>,
}

impl<S: SheetSink + ?Sized> CareersService<S> {
    pub(crate) fn new(sink: Box<S>) -> Self {
        Self { sink }
    }

    pub(crate) async fn submit(
        &self,
        application: CareerApplication,
        submitted_at: DateTime<Utc>,
    ) -> Result<(), SheetError> {
        let position = application.position.clone();
        self.sink
            .append_row(application.into_row(submitted_at))
            .await
            .inspect_err(|err| warn!(position = %position, error = %err, "failed to record application"))?;

        info!(position = %position, "career application recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;

    #[derive(Clone, Default)]
    struct FakeSheet {
        rows: Arc<Mutex<Vec<Vec<String>>>>,
        fail: bool,
    }

    #[async_trait]
    impl SheetSink for FakeSheet {
        async fn append_row(&self, row: Vec<String>) -> Result<(), SheetError> {
            if self.fail {
                return Err(SheetError::Io(std::io::Error::other("disk full")));
            }
            self.rows.lock().expect("rows mutex poisoned").push(row);
            Ok(())
        }
    }

    fn application() -> CareerApplication {
        CareerApplication {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: "123".to_string(),
            position: "Designer".to_string(),
            linkedin: Some("https://linkedin.com/in/ann".to_string()),
            portfolio: None,
            resume: "https://cv".to_string(),
            message: "Hello".to_string(),
        }
    }

    #[tokio::test]
    async fn submit_appends_one_row() {
        let sheet = FakeSheet::default();
        let service = CareersService::new(Box::new(sheet.clone()));

        service
            .submit(application(), Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap())
            .await
            .expect("submit must succeed");

        let rows = sheet.rows.lock().expect("rows mutex poisoned");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0][0], "1/6/2025, 5:30:00 pm");
        assert_eq!(rows[0][1], "Ann");
        assert_eq!(rows[0][5], "https://linkedin.com/in/ann");
        assert_eq!(rows[0][6], "");
    }

    #[tokio::test]
    async fn submit_propagates_sink_failure() {
        let sheet = FakeSheet {
            fail: true,
            ..FakeSheet::default()
        };
        let service = CareersService::new(Box::new(sheet));

        let err = service
            .submit(application(), Utc::now())
            .await
            .expect_err("failing sink must fail");
        assert!(err.to_string().contains("disk full"));
    }
}
