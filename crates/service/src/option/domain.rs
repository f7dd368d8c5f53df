use models::option::RecordId;

/// Create input: everything but the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOption {
    pub name: String,
    pub description: Option<String>,
}

/// Update input; the id selects the record, the rest overwrites it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionUpdate {
    pub id: RecordId,
    pub name: String,
    pub description: Option<String>,
}

impl NewOption {
    pub fn new(name: impl Into<String>, description: Option<&str>) -> Self {
        Self { name: name.into(), description: description.map(str::to_string) }
    }
}
