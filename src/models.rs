use chrono::{DateTime, Local, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// A single logged injection. Records are append/remove only and never
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectionRecord {
    pub id: String,
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One calendar day of protein/water intake against the daily goals.
/// The nutrition history holds at most one of these per date.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyNutrition {
    pub date: NaiveDate,
    pub protein: f64,
    pub water: f64,
    pub protein_goal: f64,
    pub water_goal: f64,
}

impl DailyNutrition {
    pub const DEFAULT_PROTEIN_GOAL: f64 = 100.0;
    pub const DEFAULT_WATER_GOAL: f64 = 2000.0;

    /// Fresh zeroed counters for `date` with the default goals.
    pub fn for_date(date: NaiveDate) -> Self {
        Self {
            date,
            protein: 0.0,
            water: 0.0,
            protein_goal: Self::DEFAULT_PROTEIN_GOAL,
            water_goal: Self::DEFAULT_WATER_GOAL,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutineSchedule {
    pub id: String,
    pub frequency_days: u32,
    pub preferred_time: NaiveTime,
    pub reminder_lead_hours: u32,
    pub active: bool,
    pub next_injection_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionState {
    pub active: bool,
    pub start_date: DateTime<Local>,
    pub email: String,
    pub plan: String,
    pub amount: f64,
}

/// Everything the tracker persists, one field per storage slot.
#[derive(Debug, Clone, Default)]
pub struct AppData {
    pub injections: Vec<InjectionRecord>,
    pub nutrition: Vec<DailyNutrition>,
    pub routine: Option<RoutineSchedule>,
    pub subscription: Option<SubscriptionState>,
}

#[derive(Debug, Deserialize)]
pub struct NutritionUpdateRequest {
    pub counter: String,
    pub delta: f64,
}

#[derive(Debug, Deserialize)]
pub struct NewInjectionRequest {
    pub date: NaiveDate,
    pub photo: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RoutineRequest {
    pub frequency_days: u32,
    pub preferred_time: String,
    pub reminder_lead_hours: u32,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutRequest {
    pub email: String,
    pub card_number: String,
    pub card_name: String,
    pub expiry_date: String,
    pub cvv: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TodayResponse {
    pub nutrition: DailyNutrition,
    pub protein_percent: i64,
    pub water_percent: i64,
}

/// One charted day of the rolling window.
#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub protein: f64,
    pub protein_goal: f64,
    pub water: f64,
    pub water_goal: f64,
    pub protein_percent: i64,
    pub water_percent: i64,
}

#[derive(Debug, Default, PartialEq, Serialize)]
pub struct NutritionAverages {
    pub avg_protein: i64,
    pub avg_water: i64,
    pub pct_days_protein_goal_met: i64,
    pub pct_days_water_goal_met: i64,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub last_7_days: Vec<DailyPoint>,
    pub summary: NutritionAverages,
}

#[derive(Debug, Serialize)]
pub struct RoutineResponse {
    pub routine: Option<RoutineSchedule>,
    /// Signed day count to the next scheduled injection; zero or negative
    /// means due today (or overdue). Absent when no routine is configured.
    pub days_until_next: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubscriptionResponse {
    pub active: bool,
}
