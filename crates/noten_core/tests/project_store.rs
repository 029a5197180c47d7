use chrono::{Duration, NaiveDate, Utc};
use noten_core::{
    AppData, AppSettings, JsonProjectRepository, JsonSettingsRepository, Project,
    ProjectRepository, Recurrence, SettingsRepository, ThemeMode,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn load_creates_default_document_with_personal_project() {
    let dir = TempDir::new().unwrap();
    let repo = JsonProjectRepository::in_dir(dir.path().join("data"));

    let data = repo.load().unwrap();

    assert!(repo.path().exists());
    assert_eq!(data.projects.len(), 1);
    assert_eq!(data.projects[0].name, "Personal");
    assert_eq!(data.active_project_id, data.projects[0].id);
    assert!(!data.active_project_id.is_nil());
    assert_eq!(data.schema_version, 1);
}

#[test]
fn second_load_returns_persisted_document() {
    let dir = TempDir::new().unwrap();
    let repo = JsonProjectRepository::in_dir(dir.path());

    let first = repo.load().unwrap();
    let second = repo.load().unwrap();

    assert_eq!(first, second);
}

#[test]
fn save_stamps_every_project_and_round_trips() {
    let dir = TempDir::new().unwrap();
    let repo = JsonProjectRepository::in_dir(dir.path());
    let mut data = repo.load().unwrap();
    let stale = Utc::now() - Duration::days(30);
    let mut other = Project::new("Other");
    other.updated_at_utc = stale;
    data.projects[0].updated_at_utc = stale;
    data.projects.push(other);
    let before_save = Utc::now();

    repo.save(&mut data).unwrap();

    assert!(data.projects.iter().all(|project| project.updated_at_utc >= before_save));
    assert!(data
        .projects
        .iter()
        .all(|project| project.created_at_utc <= project.updated_at_utc));
    assert_eq!(repo.load().unwrap(), data);
}

#[test]
fn document_uses_camel_case_keys() {
    let dir = TempDir::new().unwrap();
    let repo = JsonProjectRepository::in_dir(dir.path());
    repo.load().unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(repo.path()).unwrap()).unwrap();
    assert_eq!(json["schemaVersion"], 1);
    assert!(json["activeProjectId"].is_string());
    let project = &json["projects"][0];
    assert!(project["createdAtUtc"].is_string());
    assert!(project["notesRtf"].is_string());
    assert!(project["scheduleEntries"].is_array());
}

#[test]
fn malformed_document_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let repo = JsonProjectRepository::in_dir(dir.path());
    fs::write(repo.path(), "{ this is not json").unwrap();

    let data = repo.load().unwrap();

    assert_eq!(data.projects.len(), 1);
    assert_eq!(data.projects[0].name, "Personal");
}

#[test]
fn document_with_numeric_kinds_and_date_times_loads_intact() {
    let dir = TempDir::new().unwrap();
    let repo = JsonProjectRepository::in_dir(dir.path());
    let raw = r#"{
  "schemaVersion": 1,
  "appVersion": "0.1.0",
  "activeProjectId": "d290f1ee-6c54-4b01-90e6-d701748f0851",
  "projects": [
    {
      "id": "d290f1ee-6c54-4b01-90e6-d701748f0851",
      "name": "Mine",
      "createdAtUtc": "2026-01-01T08:00:00.1234567Z",
      "updatedAtUtc": "2026-01-02T09:00:00Z",
      "notesRtf": "",
      "lists": [],
      "scheduleEntries": [
        { "id": "6f9619ff-8b86-d011-b42d-00cf4fc964ff", "title": "Gym",
          "date": "2026-01-02T00:00:00", "startTime": null, "endTime": null,
          "notes": "", "linkedTodoItemId": null, "recurrence": 1,
          "recurrenceUntil": null }
      ]
    }
  ]
}"#;
    fs::write(repo.path(), raw).unwrap();

    let data = repo.load().unwrap();

    assert_eq!(data.projects.len(), 1);
    assert_eq!(data.projects[0].name, "Mine");
    assert_eq!(data.active_project_id, data.projects[0].id);
    let entry = &data.projects[0].schedule_entries[0];
    assert_eq!(entry.recurrence, Recurrence::Daily);
    assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 1, 2).unwrap());
}

#[test]
fn null_document_falls_back_to_default() {
    let dir = TempDir::new().unwrap();
    let repo = JsonProjectRepository::in_dir(dir.path());
    fs::write(repo.path(), "null").unwrap();

    let data: AppData = repo.load().unwrap();

    assert_eq!(data.projects[0].name, "Personal");
}

#[test]
fn settings_round_trip_and_default_on_first_load() {
    let dir = TempDir::new().unwrap();
    let repo = JsonSettingsRepository::in_dir(dir.path());

    let defaults = repo.load().unwrap();
    assert_eq!(defaults, AppSettings::default());
    assert!(dir.path().join("settings.json").exists());

    let mut changed = defaults;
    changed.always_on_top = true;
    changed.theme_mode = ThemeMode::Dark;
    changed.hotkey = "Ctrl+Shift+K".to_string();
    repo.save(&changed).unwrap();

    assert_eq!(repo.load().unwrap(), changed);
}

#[test]
fn malformed_settings_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    let repo = JsonSettingsRepository::in_dir(dir.path());
    fs::write(dir.path().join("settings.json"), "[1, 2").unwrap();

    assert_eq!(repo.load().unwrap(), AppSettings::default());
}
