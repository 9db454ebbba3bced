use crate::core::csv_export::CsvExporter;
use crate::core::download::CsvDownload;
use crate::core::filter::FieldFilter;
use crate::domain::model::{
    FieldRecord, Notification, NotificationLabels, NotificationVariant, ObjectOption, RawField,
    Record,
};
use crate::domain::ports::{MetadataSource, Notifier};
use crate::utils::error::{Result, ViewerError};

/// Ticket for one in-flight field fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRequest {
    pub seq: u64,
    pub object: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Applied { rows: usize },
    /// A newer request was issued after this one; the response was dropped.
    Stale,
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub options: Vec<ObjectOption>,
    pub selected: Option<ObjectOption>,
    pub complete: Vec<FieldRecord>,
    pub rows: Vec<FieldRecord>,
    pub filter: FieldFilter,
    pub show_table: bool,
    pub export_disabled: bool,
    pub error: Option<String>,
}

pub struct ObjectViewer<M: MetadataSource, N: Notifier> {
    source: M,
    notifier: N,
    labels: NotificationLabels,
    state: ViewState,
    attached: bool,
    latest_seq: u64,
}

impl<M: MetadataSource, N: Notifier> ObjectViewer<M, N> {
    pub fn new(source: M, notifier: N) -> Self {
        Self {
            source,
            notifier,
            labels: NotificationLabels::default(),
            state: ViewState {
                export_disabled: true,
                ..ViewState::default()
            },
            attached: false,
            latest_seq: 0,
        }
    }

    pub fn with_labels(mut self, labels: NotificationLabels) -> Self {
        self.labels = labels;
        self
    }

    pub fn source(&self) -> &M {
        &self.source
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Loads the object list. Only the first call talks to the source.
    pub async fn attach(&mut self) -> Result<()> {
        if self.attached {
            return Ok(());
        }
        self.attached = true;

        match self.source.list_object_types().await {
            Ok(objects) => {
                self.state.options = objects
                    .into_iter()
                    .map(|(label, value)| ObjectOption { label, value })
                    .collect();
                self.state.options.sort_by(|a, b| a.label.cmp(&b.label));
                self.state.error = None;
                tracing::info!("Loaded {} object types", self.state.options.len());
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load object types: {}", e);
                self.state.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Matches an identifier exactly, then a label ignoring case.
    pub fn resolve_option(&self, object: &str) -> Option<&ObjectOption> {
        self.state
            .options
            .iter()
            .find(|option| option.value == object)
            .or_else(|| {
                self.state
                    .options
                    .iter()
                    .find(|option| option.label.eq_ignore_ascii_case(object))
            })
    }

    pub fn begin_select(&mut self, object: &str) -> Result<FieldRequest> {
        let option = self
            .resolve_option(object)
            .cloned()
            .ok_or_else(|| ViewerError::UnknownObject {
                object: object.to_string(),
            })?;

        self.latest_seq += 1;
        let request = FieldRequest {
            seq: self.latest_seq,
            object: option.value.clone(),
        };
        tracing::debug!("Field request #{} for {}", request.seq, request.object);

        self.state.show_table = false;
        self.state.selected = Some(option);
        self.state.filter = FieldFilter::default();
        self.state.complete.clear();
        self.refresh();

        Ok(request)
    }

    pub fn complete_select(
        &mut self,
        request: FieldRequest,
        result: Result<Vec<RawField>>,
    ) -> SelectOutcome {
        if request.seq != self.latest_seq {
            tracing::warn!(
                "Discarding stale field response #{} for {} (latest is #{})",
                request.seq,
                request.object,
                self.latest_seq
            );
            return SelectOutcome::Stale;
        }

        match result {
            Ok(fields) => {
                self.state.complete = fields.into_iter().map(FieldRecord::from_raw).collect();
                self.state.show_table = true;
                self.state.error = None;
                let rows = self.refresh().rows.len();
                tracing::info!("Loaded {} fields for {}", rows, request.object);
                SelectOutcome::Applied { rows }
            }
            Err(e) => {
                tracing::warn!("Failed to load fields for {}: {}", request.object, e);
                self.state.error = Some(e.to_string());
                SelectOutcome::Failed
            }
        }
    }

    pub async fn select_object(&mut self, object: &str) -> Result<SelectOutcome> {
        let request = self.begin_select(object)?;
        let result = self.source.list_fields(&request.object).await;
        Ok(self.complete_select(request, result))
    }

    pub fn set_name_filter(&mut self, value: &str) -> &ViewState {
        self.state.filter.name = value.to_string();
        self.apply_filters()
    }

    pub fn set_datatype_filter(&mut self, value: &str) -> &ViewState {
        self.state.filter.datatype = value.to_string();
        self.apply_filters()
    }

    fn apply_filters(&mut self) -> &ViewState {
        self.refresh();
        if self.state.show_table && self.state.rows.is_empty() {
            self.show_no_data();
        }
        &self.state
    }

    fn show_no_data(&self) {
        self.notifier.notify(Notification {
            title: self.labels.no_data_title.clone(),
            message: self.labels.no_data_message.clone(),
            variant: NotificationVariant::Error,
        });
    }

    /// Recomputes rows and the export flag from the complete set.
    pub fn refresh(&mut self) -> &ViewState {
        self.state.rows = self.state.filter.apply(&self.state.complete);
        self.state.export_disabled = !self.state.show_table || self.state.rows.is_empty();
        &self.state
    }

    pub fn export_csv(&self, exporter: &CsvExporter) -> Result<CsvDownload> {
        let selected = self
            .state
            .selected
            .as_ref()
            .ok_or(ViewerError::NoObjectSelected)?;

        if self.state.export_disabled {
            return Err(ViewerError::ExportDisabled {
                object: selected.label.clone(),
            });
        }

        let records: Vec<Record> = self.state.rows.iter().map(FieldRecord::to_record).collect();
        let content = exporter.serialize(&records)?;
        Ok(CsvDownload::new(&selected.label, content))
    }
}
