//! Diesel schema for planner persistence.

diesel::table! {
    /// Task records keyed by identifier, indexed by bucket and creation time.
    tasks (id) {
        /// Task identifier (UUID string).
        id -> Text,
        /// Day bucket storage string.
        day -> Text,
        /// User-supplied task content.
        text -> Text,
        /// Optional `HH:MM` time-of-day.
        time -> Nullable<Text>,
        /// Completion flag.
        completed -> Bool,
        /// Creation timestamp, epoch microseconds.
        created -> BigInt,
        /// Latest-mutation timestamp, epoch microseconds; null until the
        /// first update.
        updated -> Nullable<BigInt>,
    }
}

diesel::table! {
    /// Singleton current-project record under a fixed key.
    projects (id) {
        /// Fixed singleton key.
        id -> Text,
        /// Project name.
        name -> Text,
        /// Last-save timestamp, epoch microseconds.
        updated -> BigInt,
    }
}
