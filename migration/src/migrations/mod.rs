pub mod m202506010001_create_users;
pub mod m202506010002_create_subjects;
pub mod m202506010003_create_quizzes;
pub mod m202506010004_create_exams;
pub mod m202506010005_create_exam_quizzes;
pub mod m202506010006_create_exam_results;
