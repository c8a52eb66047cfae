use crate::models::InjectionRecord;

/// Prepend a record; the log is kept most-recent-first.
pub fn add(mut log: Vec<InjectionRecord>, record: InjectionRecord) -> Vec<InjectionRecord> {
    log.insert(0, record);
    log
}

/// Drop the record with the given id. Removing an unknown id is a no-op,
/// not an error.
pub fn remove(mut log: Vec<InjectionRecord>, id: &str) -> Vec<InjectionRecord> {
    log.retain(|record| record.id != id);
    log
}

/// The newest record, used as the default anchor date for the routine
/// scheduler.
pub fn most_recent(log: &[InjectionRecord]) -> Option<&InjectionRecord> {
    log.first()
}
