pub mod exam;
pub mod exam_result;
pub mod quiz;
pub mod subject;
pub mod user;
