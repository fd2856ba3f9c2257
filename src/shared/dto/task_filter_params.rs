use serde::Deserialize;

/// Query string of `GET /api/board`.
///
/// `status` keeps the difference between absent (`None`) and `status=`
/// (`Some("")`); the filter composer treats them differently.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskFilterParams {
    pub title: Option<String>,
    #[serde(rename = "title__icontains")]
    pub title_contains: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "description__icontains")]
    pub description_contains: Option<String>,
    pub status: Option<String>,
}
