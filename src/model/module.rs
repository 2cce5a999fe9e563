use serde::Serialize;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

/// Entries of the navigation menu, in display order.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Display, EnumString, EnumIter)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Module {
    Dashboard,
    Students,
    Teachers,
    Courses,
    Schedule,
    Payments,
    Grades,
}

/// What selecting a module does.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Capability {
    /// Served by the given route, relative to the API prefix.
    Available { path: &'static str },
    NotImplemented,
}

impl Module {
    pub fn title(self) -> &'static str {
        match self {
            Module::Dashboard => "Dashboard",
            Module::Students => "Students",
            Module::Teachers => "Teachers",
            Module::Courses => "Courses",
            Module::Schedule => "Schedule",
            Module::Payments => "Payments",
            Module::Grades => "Grades & Attendance",
        }
    }

    pub fn capability(self) -> Capability {
        match self {
            Module::Grades => Capability::Available {
                path: "/grades/dashboard",
            },
            Module::Dashboard
            | Module::Students
            | Module::Teachers
            | Module::Courses
            | Module::Schedule
            | Module::Payments => Capability::NotImplemented,
        }
    }

    pub fn menu() -> Vec<MenuEntry> {
        Module::iter().map(MenuEntry::from).collect()
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MenuEntry {
    #[schema(example = "grades")]
    pub key: String,
    #[schema(example = "Grades & Attendance")]
    pub title: String,
    pub implemented: bool,
    #[schema(example = "/grades/dashboard", nullable = true)]
    pub path: Option<String>,
}

impl From<Module> for MenuEntry {
    fn from(module: Module) -> Self {
        let path = match module.capability() {
            Capability::Available { path } => Some(path.to_string()),
            Capability::NotImplemented => None,
        };
        MenuEntry {
            key: module.to_string(),
            title: module.title().to_string(),
            implemented: path.is_some(),
            path,
        }
    }
}
