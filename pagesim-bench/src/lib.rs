pub mod policy;
pub mod util;
pub mod workload;
