pub mod fastq;
pub mod history;
pub mod replace;
pub mod results;

pub use history::{
    resource_root, FetchOutcome, HistoryResource, JobId, TaskId, TasksResponse,
};
pub use results::RetrievalResults;
