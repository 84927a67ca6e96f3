//! Employee profile axes used for rate lookup and break policy.
//!
//! This module defines the [`AgeGroup`], [`AgeClass`] and [`JobFunction`] enums.
//! Together with years of service they key the hourly-rate tables.

use serde::{Deserialize, Serialize};

/// Age bracket an hourly rate is published for.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{AgeClass, AgeGroup};
///
/// assert_eq!(AgeGroup::Age17.age_class(), AgeClass::Minor);
/// assert_eq!(AgeGroup::Age21Plus.age_class(), AgeClass::Adult);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AgeGroup {
    /// Ages 13 through 15.
    #[serde(rename = "13-15")]
    Age13To15,
    /// Age 16.
    #[serde(rename = "16")]
    Age16,
    /// Age 17.
    #[serde(rename = "17")]
    Age17,
    /// Age 18.
    #[serde(rename = "18")]
    Age18,
    /// Age 19.
    #[serde(rename = "19")]
    Age19,
    /// Age 20.
    #[serde(rename = "20")]
    Age20,
    /// Age 21 and older.
    #[serde(rename = "21+")]
    Age21Plus,
}

impl AgeGroup {
    /// All age groups in ascending order.
    pub const ALL: [AgeGroup; 7] = [
        AgeGroup::Age13To15,
        AgeGroup::Age16,
        AgeGroup::Age17,
        AgeGroup::Age18,
        AgeGroup::Age19,
        AgeGroup::Age20,
        AgeGroup::Age21Plus,
    ];

    /// Returns true for the groups below 18.
    pub fn is_minor(self) -> bool {
        matches!(
            self,
            AgeGroup::Age13To15 | AgeGroup::Age16 | AgeGroup::Age17
        )
    }

    /// Returns the break-policy classification for this group.
    pub fn age_class(self) -> AgeClass {
        if self.is_minor() {
            AgeClass::Minor
        } else {
            AgeClass::Adult
        }
    }

    /// The label used in rate tables and requests (e.g. "21+").
    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::Age13To15 => "13-15",
            AgeGroup::Age16 => "16",
            AgeGroup::Age17 => "17",
            AgeGroup::Age18 => "18",
            AgeGroup::Age19 => "19",
            AgeGroup::Age20 => "20",
            AgeGroup::Age21Plus => "21+",
        }
    }
}

impl std::fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Age classification used by the break policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgeClass {
    /// Under 18.
    Minor,
    /// 18 or older.
    Adult,
}

impl std::fmt::Display for AgeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgeClass::Minor => write!(f, "minor"),
            AgeClass::Adult => write!(f, "adult"),
        }
    }
}

/// Store job function an hourly rate is published for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobFunction {
    /// Shelf stocker. Also the fallback when the lead function is unavailable.
    ShelfStocker,
    /// Cashier.
    Cashier,
    /// Sales associate.
    SalesAssociate,
    /// Quality associate.
    QualityAssociate,
    /// Shift leader. Priced by age group and years of service, 18+ only.
    ShiftLeader,
}

impl JobFunction {
    /// Functions available to every age group.
    pub const BASE: [JobFunction; 4] = [
        JobFunction::ShelfStocker,
        JobFunction::Cashier,
        JobFunction::SalesAssociate,
        JobFunction::QualityAssociate,
    ];

    /// The function a configuration falls back to when its selection is unavailable.
    pub const FALLBACK: JobFunction = JobFunction::ShelfStocker;

    /// Returns true for the lead function.
    pub fn is_lead(self) -> bool {
        self == JobFunction::ShiftLeader
    }

    /// Returns true when the function can be selected for the given age group.
    pub fn is_available_for(self, age_group: AgeGroup) -> bool {
        !(self.is_lead() && age_group.is_minor())
    }
}

impl std::fmt::Display for JobFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JobFunction::ShelfStocker => write!(f, "shelf_stocker"),
            JobFunction::Cashier => write!(f, "cashier"),
            JobFunction::SalesAssociate => write!(f, "sales_associate"),
            JobFunction::QualityAssociate => write!(f, "quality_associate"),
            JobFunction::ShiftLeader => write!(f, "shift_leader"),
        }
    }
}
