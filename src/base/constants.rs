//! Domain constants shared across modules.

/// File extension of proto documents (without the dot).
pub const PROTO_EXTENSION: &str = "proto";

/// Logical path that designates the bootstrap descriptor unless configured otherwise.
pub const DEFAULT_DESCRIPTOR_PATH: &str = "google/protobuf/descriptor.proto";

/// Package declared by the bootstrap descriptor.
pub const DESCRIPTOR_PACKAGE: &str = "google.protobuf";

/// Preference key holding the descriptor path.
pub const DESCRIPTOR_PATH_PREFERENCE: &str = "general.descriptorPath";

/// Preference key selecting "imported files live in multiple directories".
pub const FILES_IN_MULTIPLE_DIRECTORIES_PREFERENCE: &str = "paths.filesInMultipleDirectories";

/// Preference key holding the comma-separated import directories.
pub const DIRECTORY_PATHS_PREFERENCE: &str = "paths.directoryPaths";

/// Separator between package and nested name segments.
pub const NAME_SEPARATOR: char = '.';
