//! GitHub Pages settings.

use crate::descriptor::{setting_enum, Describe, FieldDescriptor, FieldKind, TypeDescriptor};
use serde::{Deserialize, Serialize};

setting_enum! {
    /// How the Pages site is built.
    PagesBuildType {
        /// Built by a GitHub Actions workflow
        Workflow => "workflow",
        /// Built from a branch
        Legacy => "legacy",
    }
}

/// GitHub Pages configuration.
///
/// `branch` is needed only for `legacy` builds; the schema enforces that.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pages {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    pub build_type: PagesBuildType,
}

impl Describe for Pages {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::new(
            "Pages",
            vec![
                FieldDescriptor::optional("cname", FieldKind::String),
                FieldDescriptor::optional("branch", FieldKind::String),
                FieldDescriptor::optional("path", FieldKind::String),
                FieldDescriptor::required("build_type", FieldKind::enumeration::<PagesBuildType>()),
            ],
        )
    }
}
