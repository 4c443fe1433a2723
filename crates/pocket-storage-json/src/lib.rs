use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use pocket_core::{
    storage::{profile_warnings, BookBackupInfo, ProfileStorage},
    CoreError,
};
use pocket_domain::{Profile, ProfileBook, CURRENT_SCHEMA_VERSION};

const BOOK_FILE_STEM: &str = "profiles";
const FILE_EXTENSION: &str = "json";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";
const TMP_SUFFIX: &str = "tmp";
const DEFAULT_RETENTION: usize = 5;

/// Locations used by [`JsonProfileStorage`].
#[derive(Debug, Clone)]
pub struct StoragePaths {
    pub data_root: PathBuf,
    pub backup_root: PathBuf,
}

impl StoragePaths {
    pub fn under(root: &Path) -> Self {
        Self {
            data_root: root.join("data"),
            backup_root: root.join("backups"),
        }
    }
}

/// Filesystem-backed JSON persistence for the profile book and its backups.
#[derive(Debug, Clone)]
pub struct JsonProfileStorage {
    data_root: PathBuf,
    backup_root: PathBuf,
    retention: usize,
}

impl JsonProfileStorage {
    pub fn new(paths: StoragePaths) -> Result<Self, CoreError> {
        Self::with_retention(paths, DEFAULT_RETENTION)
    }

    pub fn with_retention(paths: StoragePaths, retention: usize) -> Result<Self, CoreError> {
        fs::create_dir_all(&paths.data_root)?;
        fs::create_dir_all(&paths.backup_root)?;
        Ok(Self {
            data_root: paths.data_root,
            backup_root: paths.backup_root,
            retention: retention.max(1),
        })
    }

    pub fn book_path(&self) -> PathBuf {
        self.data_root
            .join(format!("{}.{}", BOOK_FILE_STEM, FILE_EXTENSION))
    }

    pub fn backup_root(&self) -> &Path {
        &self.backup_root
    }

    pub fn retention(&self) -> usize {
        self.retention
    }

    pub fn delete_backup(&self, backup_id: &str) -> Result<(), CoreError> {
        let path = self.backup_root.join(backup_id);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    fn write_backup_file(
        &self,
        book: &ProfileBook,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError> {
        fs::create_dir_all(&self.backup_root)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let mut stem = format!("{}_{}", BOOK_FILE_STEM, timestamp);
        if let Some(label) = sanitize_backup_note(note) {
            stem.push('_');
            stem.push_str(&label);
        }
        let file_name = unique_file_name(&self.backup_root, &stem);
        let path = self.backup_root.join(&file_name);
        write_atomic(&path, &serialize(book)?)?;
        self.prune_backups()?;
        info!(backup = %file_name, "profile book backed up");
        Ok(BookBackupInfo {
            id: file_name,
            created_at: timestamp,
            path,
        })
    }

    fn backup_existing_file(&self, path: &Path) -> Result<(), CoreError> {
        if !path.exists() {
            return Ok(());
        }
        fs::create_dir_all(&self.backup_root)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        let stem = format!("{}_{}", BOOK_FILE_STEM, timestamp);
        let file_name = unique_file_name(&self.backup_root, &stem);
        fs::copy(path, self.backup_root.join(&file_name))?;
        debug!(backup = %file_name, "previous book preserved");
        self.prune_backups()
    }

    fn prune_backups(&self) -> Result<(), CoreError> {
        let entries = self.list_backups()?;
        for entry in entries.into_iter().skip(self.retention) {
            if fs::remove_file(&entry.path).is_ok() {
                debug!(backup = %entry.id, "pruned old backup");
            }
        }
        Ok(())
    }
}

impl ProfileStorage for JsonProfileStorage {
    fn save_book(&self, book: &ProfileBook) -> Result<(), CoreError> {
        let path = self.book_path();
        self.backup_existing_file(&path)?;
        save_book_to_path(book, &path)
    }

    fn load_book(&self) -> Result<ProfileBook, CoreError> {
        let path = self.book_path();
        if !path.exists() {
            return Ok(ProfileBook::default());
        }
        load_book_from_path(&path)
    }

    fn backup_book(
        &self,
        book: &ProfileBook,
        note: Option<&str>,
    ) -> Result<BookBackupInfo, CoreError> {
        self.write_backup_file(book, note)
    }

    fn list_backups(&self) -> Result<Vec<BookBackupInfo>, CoreError> {
        if !self.backup_root.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.backup_root)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                let Some(created) = parse_backup_timestamp(file_name) else {
                    continue;
                };
                entries.push((
                    created,
                    BookBackupInfo {
                        id: file_name.to_string(),
                        created_at: created.format(BACKUP_TIMESTAMP_FORMAT).to_string(),
                        path: path.clone(),
                    },
                ));
            }
        }
        entries.sort_by_key(|(created, info)| Reverse((*created, backup_sequence(&info.id))));
        Ok(entries.into_iter().map(|(_, info)| info).collect())
    }

    fn restore_backup(&self, backup: &BookBackupInfo) -> Result<ProfileBook, CoreError> {
        if !backup.path.exists() {
            return Err(CoreError::Storage(format!(
                "backup `{}` not found",
                backup.id
            )));
        }
        let book = load_book_from_path(&backup.path)?;
        let target = self.book_path();
        self.backup_existing_file(&target)?;
        save_book_to_path(&book, &target)?;
        info!(backup = %backup.id, "profile book restored");
        Ok(book)
    }

    fn export_profile(&self, profile: &Profile, path: &Path) -> Result<(), CoreError> {
        let json =
            serde_json::to_string_pretty(profile).map_err(|err| CoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, path)?;
        info!(profile = %profile.id, path = %path.display(), "profile exported");
        Ok(())
    }

    fn import_profile(&self, book: &mut ProfileBook, path: &Path) -> Result<Uuid, CoreError> {
        let raw = fs::read_to_string(path)?;
        let mut profile: Profile =
            serde_json::from_str(&raw).map_err(|err| CoreError::Serde(err.to_string()))?;
        if book.profile(profile.id).is_some() {
            let fresh = Uuid::new_v4();
            debug!(previous = %profile.id, fresh = %fresh, "imported profile id collides");
            profile.id = fresh;
        }
        for warning in profile_warnings(&profile.data) {
            warn!(profile = %profile.id, "{}", warning);
        }
        let id = profile.id;
        book.profiles.push(profile);
        if book.active_profile_id.is_none() {
            book.active_profile_id = Some(id);
        }
        info!(profile = %id, "profile imported");
        Ok(id)
    }
}

/// Saves a profile book to an arbitrary path on disk.
pub fn save_book_to_path(book: &ProfileBook, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp = tmp_path(path);
    write_atomic(&tmp, &serialize(book)?)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a profile book, refusing files written by a newer schema.
pub fn load_book_from_path(path: &Path) -> Result<ProfileBook, CoreError> {
    let raw = fs::read_to_string(path)?;
    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(|err| CoreError::Serde(err.to_string()))?;
    if let Some(version) = value.get("schema_version").and_then(|v| v.as_u64()) {
        if version > u64::from(CURRENT_SCHEMA_VERSION) {
            return Err(CoreError::Storage(format!(
                "`{}` uses schema version {} but only {} is supported",
                path.display(),
                version,
                CURRENT_SCHEMA_VERSION
            )));
        }
    }
    let mut book: ProfileBook =
        serde_json::from_value(value).map_err(|err| CoreError::Serde(err.to_string()))?;
    book.schema_version = CURRENT_SCHEMA_VERSION;
    for profile in &book.profiles {
        for warning in profile_warnings(&profile.data) {
            warn!(profile = %profile.id, "{}", warning);
        }
    }
    Ok(book)
}

fn sanitize_backup_note(note: Option<&str>) -> Option<String> {
    let raw = note?.trim();
    if raw.is_empty() {
        return None;
    }
    let mut sanitized = String::new();
    let mut last_dash = false;
    for ch in raw.chars() {
        if ch.is_ascii_alphanumeric() {
            sanitized.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || matches!(ch, '-' | '.'))
            && !sanitized.is_empty()
            && !last_dash
        {
            sanitized.push('-');
            last_dash = true;
        }
    }
    let trimmed = sanitized.trim_matches('-').to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Backups are named `profiles_<date>_<time>[_<note>][-<n>].json`.
fn parse_backup_timestamp(file_name: &str) -> Option<DateTime<Utc>> {
    let stem = file_name.strip_suffix(&format!(".{}", FILE_EXTENSION))?;
    let rest = stem.strip_prefix(&format!("{}_", BOOK_FILE_STEM))?;
    let mut segments = rest.split('_');
    let date = segments.next()?;
    let time = segments.next()?;
    let time = time.split('-').next()?;
    if !is_digits(date, 8) || !is_digits(time, 6) {
        return None;
    }
    NaiveDateTime::parse_from_str(&format!("{}{}", date, time), "%Y%m%d%H%M%S")
        .ok()
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Same-second backups carry a `-<n>` suffix; higher is newer.
fn backup_sequence(file_name: &str) -> u32 {
    file_name
        .strip_suffix(&format!(".{}", FILE_EXTENSION))
        .and_then(|stem| stem.rsplit_once('-'))
        .and_then(|(_, tail)| tail.parse().ok())
        .unwrap_or(0)
}

fn is_digits(value: &str, len: usize) -> bool {
    value.len() == len && value.chars().all(|c| c.is_ascii_digit())
}

fn unique_file_name(dir: &Path, stem: &str) -> String {
    let mut candidate = format!("{}.{}", stem, FILE_EXTENSION);
    let mut counter = 1;
    while dir.join(&candidate).exists() {
        candidate = format!("{}-{}.{}", stem, counter, FILE_EXTENSION);
        counter += 1;
    }
    candidate
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

fn serialize(book: &ProfileBook) -> Result<String, CoreError> {
    serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))
}
