pub mod synchronizer;
pub mod writer;

// Domain services
// The synchronizer pulls the latest samples into the reading state;
// the writer persists new readings and then asks the synchronizer to refresh.

pub use synchronizer::LatestReadingSynchronizer;
pub use writer::ReadingWriter;
