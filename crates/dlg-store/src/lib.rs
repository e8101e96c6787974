mod colors;
mod ids;
mod io;
mod rng;
mod store;

pub use colors::ColorAssignment;
pub use io::{
    export_json, parse_dialogue, read_dialogue_file, validate_dialogue, write_dialogue_file,
    DEFAULT_EXPORT_FILE_NAME,
};
pub use store::{DialogueStore, ResponseCandidate, StoreOptions};
