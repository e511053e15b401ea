#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(i64),
    TaskUpdated(i64),
    TaskDeleted(i64),
    TaskNotFound(i64),
    TaskActionIgnored(i64),

    // === COMMENT MESSAGES ===
    CommentAdded(i64, i64), // comment id, task id

    // === TAG MESSAGES ===
    TagCreated(String),
    TagAttached(String, i64),        // tag name, task id
    TagAlreadyAttached(String, i64), // tag name, task id
    TagNotFound(String),

    // === VALIDATION MESSAGES ===
    FieldRequired,
    FieldTooLong(usize, usize), // max, actual

    // === CONFIGURATION MESSAGES ===
    ConfigSaved(String), // path
    ConfigDeleted(String),
    ConfigFileNotFound,
    ConfigParseError(String),
    ConfigInvalidPort(String),

    // === SERVER MESSAGES ===
    ServerListening(String), // address
    ServerShuttingDown,
    ServerBindFailed(String), // address

    // === DATABASE MESSAGES ===
    DatabaseOpened(String), // path
    DataDirCreateFailed(String),

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
}
