mod task_arn;
pub use task_arn::TaskArn;

mod task_status;
pub use task_status::TaskStatus;

mod task_filter;
pub use task_filter::TaskFilter;

mod run_spec;
pub use run_spec::RunTaskSpec;

mod instance;
pub use instance::{Instance, InstanceId, InstanceState};

mod schedule;
pub use schedule::StopSchedule;
