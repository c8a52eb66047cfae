use crate::errors::AppError;
use crate::models::{
    AppData, CheckoutRequest, DailyNutrition, InjectionRecord, NewInjectionRequest,
    NutritionUpdateRequest, RoutineRequest, RoutineResponse, RoutineSchedule, StatsResponse,
    SubscriptionResponse, SubscriptionState, TodayResponse,
};
use crate::state::AppState;
use crate::storage::{
    INJECTIONS_KEY, NUTRITION_KEY, ROUTINE_KEY, SUBSCRIPTION_KEY, persist_slot, remove_slot,
};
use crate::ui;
use crate::{injections, nutrition, routine};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use chrono::{Local, NaiveDate, NaiveTime};
use tracing::info;
use uuid::Uuid;

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Tracker reads and mutations are gated on an active subscription.
fn require_subscription(data: &AppData) -> Result<(), AppError> {
    match &data.subscription {
        Some(subscription) if subscription.active => Ok(()),
        _ => Err(AppError::payment_required()),
    }
}

fn parse_time(value: &str) -> Result<NaiveTime, AppError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::bad_request("preferred_time must be HH:MM"))
}

/// Today's counters, falling back to fresh zeroed counters with the default
/// goals when nothing has been logged yet.
fn today_nutrition(data: &AppData, date: NaiveDate) -> DailyNutrition {
    data.nutrition
        .iter()
        .find(|day| day.date == date)
        .cloned()
        .unwrap_or_else(|| DailyNutrition::for_date(date))
}

fn to_today_response(day: DailyNutrition) -> TodayResponse {
    TodayResponse {
        protein_percent: nutrition::percent_of_goal(day.protein, day.protein_goal),
        water_percent: nutrition::percent_of_goal(day.water, day.water_goal),
        nutrition: day,
    }
}

fn to_routine_response(schedule: Option<RoutineSchedule>, now: NaiveDate) -> RoutineResponse {
    let days_until_next = schedule
        .as_ref()
        .map(|schedule| routine::days_until_next(schedule, now));
    RoutineResponse {
        routine: schedule,
        days_until_next,
    }
}

// --- Pages ---

pub async fn landing() -> Html<String> {
    Html(ui::render_landing())
}

pub async fn quiz() -> Html<String> {
    Html(ui::render_quiz())
}

pub async fn checkout() -> Html<String> {
    Html(ui::render_checkout())
}

pub async fn dashboard(State(state): State<AppState>) -> Html<String> {
    let data = state.data.lock().await;
    if require_subscription(&data).is_err() {
        return Html(ui::render_lock());
    }
    let day = today_nutrition(&data, today());
    Html(ui::render_dashboard(&day, injections::most_recent(&data.injections)))
}

// --- Subscription / checkout ---

pub async fn get_subscription(
    State(state): State<AppState>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let data = state.data.lock().await;
    let active = data
        .subscription
        .as_ref()
        .is_some_and(|subscription| subscription.active);
    Ok(Json(SubscriptionResponse { active }))
}

pub async fn submit_checkout(
    State(state): State<AppState>,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<SubscriptionResponse>, AppError> {
    let email = payload.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::bad_request("a valid email is required"));
    }
    if payload.card_number.trim().is_empty()
        || payload.card_name.trim().is_empty()
        || payload.expiry_date.trim().is_empty()
        || payload.cvv.trim().is_empty()
    {
        return Err(AppError::bad_request("all card fields are required"));
    }

    // Simulated payment: no processor is contacted, the subscription slot
    // is written directly.
    let subscription = SubscriptionState {
        active: true,
        start_date: Local::now(),
        email: email.to_string(),
        plan: "monthly".to_string(),
        amount: 19.90,
    };

    let mut data = state.data.lock().await;
    persist_slot(&state.data_dir, SUBSCRIPTION_KEY, &subscription).await?;
    data.subscription = Some(subscription);
    info!("subscription activated for {email}");

    Ok(Json(SubscriptionResponse { active: true }))
}

// --- Nutrition ---

pub async fn get_today(State(state): State<AppState>) -> Result<Json<TodayResponse>, AppError> {
    let data = state.data.lock().await;
    require_subscription(&data)?;
    Ok(Json(to_today_response(today_nutrition(&data, today()))))
}

pub async fn update_nutrition(
    State(state): State<AppState>,
    Json(payload): Json<NutritionUpdateRequest>,
) -> Result<Json<TodayResponse>, AppError> {
    let counter = payload.counter.trim();
    if counter != "protein" && counter != "water" {
        return Err(AppError::bad_request("counter must be 'protein' or 'water'"));
    }

    let mut data = state.data.lock().await;
    require_subscription(&data)?;

    let mut day = today_nutrition(&data, today());
    if counter == "protein" {
        day.protein = nutrition::update_counter(day.protein, payload.delta);
    } else {
        day.water = nutrition::update_counter(day.water, payload.delta);
    }

    data.nutrition = nutrition::merge_into_history(std::mem::take(&mut data.nutrition), day.clone());
    persist_slot(&state.data_dir, NUTRITION_KEY, &data.nutrition).await?;

    Ok(Json(to_today_response(day)))
}

pub async fn get_stats(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    require_subscription(&data)?;
    Ok(Json(StatsResponse {
        last_7_days: nutrition::build_chart_points(&data.nutrition),
        summary: nutrition::average_and_goal_met_rate(&data.nutrition),
    }))
}

// --- Injection log ---

pub async fn list_injections(
    State(state): State<AppState>,
) -> Result<Json<Vec<InjectionRecord>>, AppError> {
    let data = state.data.lock().await;
    require_subscription(&data)?;
    Ok(Json(data.injections.clone()))
}

pub async fn add_injection(
    State(state): State<AppState>,
    Json(payload): Json<NewInjectionRequest>,
) -> Result<Json<InjectionRecord>, AppError> {
    let record = InjectionRecord {
        id: Uuid::new_v4().to_string(),
        date: payload.date,
        photo: payload.photo.filter(|photo| !photo.is_empty()),
        notes: payload.notes.filter(|notes| !notes.trim().is_empty()),
    };

    let mut data = state.data.lock().await;
    require_subscription(&data)?;
    data.injections = injections::add(std::mem::take(&mut data.injections), record.clone());
    persist_slot(&state.data_dir, INJECTIONS_KEY, &data.injections).await?;

    Ok(Json(record))
}

pub async fn delete_injection(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    require_subscription(&data)?;
    data.injections = injections::remove(std::mem::take(&mut data.injections), &id);
    persist_slot(&state.data_dir, INJECTIONS_KEY, &data.injections).await?;

    Ok(StatusCode::NO_CONTENT)
}

// --- Routine scheduler ---

pub async fn get_routine(State(state): State<AppState>) -> Result<Json<RoutineResponse>, AppError> {
    let data = state.data.lock().await;
    require_subscription(&data)?;
    Ok(Json(to_routine_response(data.routine.clone(), today())))
}

pub async fn save_routine(
    State(state): State<AppState>,
    Json(payload): Json<RoutineRequest>,
) -> Result<Json<RoutineResponse>, AppError> {
    if payload.frequency_days == 0 {
        return Err(AppError::bad_request("frequency_days must be at least 1"));
    }
    if payload.reminder_lead_hours == 0 {
        return Err(AppError::bad_request("reminder_lead_hours must be at least 1"));
    }
    let preferred_time = parse_time(&payload.preferred_time)?;

    let mut data = state.data.lock().await;
    require_subscription(&data)?;

    let now = today();
    let anchor = injections::most_recent(&data.injections).map(|record| record.date);
    let schedule = match &data.routine {
        Some(existing) => routine::edit(
            existing,
            payload.frequency_days,
            preferred_time,
            payload.reminder_lead_hours,
            anchor,
            now,
        ),
        None => routine::create(
            payload.frequency_days,
            preferred_time,
            payload.reminder_lead_hours,
            anchor,
            now,
        ),
    };

    persist_slot(&state.data_dir, ROUTINE_KEY, &schedule).await?;
    data.routine = Some(schedule);

    Ok(Json(to_routine_response(data.routine.clone(), now)))
}

pub async fn toggle_routine(
    State(state): State<AppState>,
) -> Result<Json<RoutineResponse>, AppError> {
    let mut data = state.data.lock().await;
    require_subscription(&data)?;

    // Toggling with no routine configured is a silent no-op.
    if let Some(existing) = data.routine.take() {
        let toggled = routine::toggle_active(existing);
        persist_slot(&state.data_dir, ROUTINE_KEY, &toggled).await?;
        data.routine = Some(toggled);
    }

    Ok(Json(to_routine_response(data.routine.clone(), today())))
}

pub async fn delete_routine(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let mut data = state.data.lock().await;
    require_subscription(&data)?;
    data.routine = None;
    remove_slot(&state.data_dir, ROUTINE_KEY).await?;

    Ok(StatusCode::NO_CONTENT)
}
