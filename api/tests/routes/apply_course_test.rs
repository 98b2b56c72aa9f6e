#[cfg(test)]
mod tests {
    use crate::helpers::make_test_app;
    use axum::http::StatusCode;
    use db::models::{course::Model as CourseModel, user::Role};
    use serde_json::json;

    #[tokio::test]
    async fn student_buys_course_once() {
        let app = make_test_app().await;
        let (teacher, _) = app.user("t@example.com", Role::Teacher).await;
        let (student, token) = app.user("s@example.com", Role::Student).await;
        let course = CourseModel::create(&app.db, teacher.id, "Rust", "d", 25.0, "t", "m")
            .await
            .unwrap();

        let (status, json) = app
            .post_json("/api/buyCourse", Some(&token), json!({ "courseId": course.id }))
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["message"], "Course Purchased Successfully");
        assert_eq!(json["data"]["studentId"], student.id);
        assert_eq!(json["data"]["teacherId"], teacher.id);
        assert_eq!(json["data"]["price"], 25.0);

        let (status, json) = app
            .post_json("/api/buyCourse", Some(&token), json!({ "courseId": course.id }))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["message"], "Course already purchased");
    }

    #[tokio::test]
    async fn teacher_cannot_buy() {
        let app = make_test_app().await;
        let (teacher, token) = app.user("t@example.com", Role::Teacher).await;
        let course = CourseModel::create(&app.db, teacher.id, "Rust", "d", 25.0, "t", "m")
            .await
            .unwrap();

        let (status, json) = app
            .post_json("/api/buyCourse", Some(&token), json!({ "courseId": course.id }))
            .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["message"], "Only Student can buy a course");
    }

    #[tokio::test]
    async fn unknown_course_is_not_found() {
        let app = make_test_app().await;
        let (_, token) = app.user("s@example.com", Role::Student).await;

        let (status, json) = app
            .post_json("/api/buyCourse", Some(&token), json!({ "courseId": 77 }))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["message"], "Course not found");
    }
}
