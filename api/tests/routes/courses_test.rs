#[cfg(test)]
mod tests {
    use crate::helpers::app::TEST_MAX_UPLOAD_BYTES;
    use crate::helpers::{MultipartBuilder, make_test_app, make_test_app_with};
    use axum::http::StatusCode;
    use db::models::{
        apply_course::Model as ApplyCourseModel, course::Model as CourseModel, user::Role,
    };
    use services::media::MediaKind;
    use services::test_utils::RecordingMediaHost;

    fn course_form() -> MultipartBuilder {
        MultipartBuilder::new()
            .text("courseTitle", "Intro to Rust")
            .text("courseDescription", "Ownership and borrowing")
            .text("price", "49.5")
    }

    fn full_course_form() -> MultipartBuilder {
        course_form()
            .file("courseThumbnail", "thumb.jpg", "image/jpeg", b"jpeg-bytes")
            .file("material_1", "lesson.mp4", "video/mp4", b"mp4-bytes")
    }

    #[tokio::test]
    async fn teacher_uploads_course() {
        let app = make_test_app().await;
        let (teacher, token) = app.user("t@example.com", Role::Teacher).await;

        let req = full_course_form().into_request("/api/uploadCourse", Some(&token));
        let (status, json) = app.send(req).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Course Uploaded Successfully");
        assert!(json.get("data").is_none());

        let courses = CourseModel::find_all(&app.db).await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].user_id, teacher.id);
        assert_eq!(courses[0].course_title, "Intro to Rust");
        assert_eq!(
            courses[0].course_thumbnail,
            RecordingMediaHost::url_for(MediaKind::Image, 1)
        );
        assert_eq!(
            courses[0].material_1,
            RecordingMediaHost::url_for(MediaKind::Video, 2)
        );

        let uploads = app.media.uploads();
        assert!(uploads[0].data_uri().starts_with("data:image/jpeg;base64,"));
        assert!(uploads[1].data_uri().starts_with("data:video/mp4;base64,"));
    }

    #[tokio::test]
    async fn student_upload_is_forbidden_and_hosts_nothing() {
        let app = make_test_app().await;
        let (_, token) = app.user("s@example.com", Role::Student).await;

        let req = full_course_form().into_request("/api/uploadCourse", Some(&token));
        let (status, json) = app.send(req).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Only Teacher can Upload a course");
        assert!(app.media.uploads().is_empty());
        assert!(CourseModel::find_all(&app.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_attachments_are_reported_in_order() {
        let app = make_test_app().await;
        let (_, token) = app.user("t@example.com", Role::Teacher).await;

        let req = course_form().into_request("/api/uploadCourse", Some(&token));
        let (status, json) = app.send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Please Upload Course Thumbnail");

        let req = course_form()
            .file("courseThumbnail", "thumb.png", "image/png", b"png")
            .into_request("/api/uploadCourse", Some(&token));
        let (status, json) = app.send(req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Please Upload Atleast One Video");

        assert!(app.media.uploads().is_empty());
    }

    #[tokio::test]
    async fn validation_message_comes_from_first_field() {
        let app = make_test_app().await;
        let (_, token) = app.user("t@example.com", Role::Teacher).await;

        let req = MultipartBuilder::new()
            .text("courseTitle", "")
            .text("courseDescription", "")
            .text("price", "")
            .into_request("/api/uploadCourse", Some(&token));
        let (status, json) = app.send(req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Course title is required");
    }

    #[tokio::test]
    async fn undeclared_file_field_is_rejected() {
        let app = make_test_app().await;
        let (_, token) = app.user("t@example.com", Role::Teacher).await;

        let req = full_course_form()
            .file("material_2", "extra.mp4", "video/mp4", b"more")
            .into_request("/api/uploadCourse", Some(&token));
        let (status, json) = app.send(req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Unexpected field: material_2");
        assert!(app.media.uploads().is_empty());
    }

    #[tokio::test]
    async fn second_video_under_same_field_is_rejected() {
        let app = make_test_app().await;
        let (_, token) = app.user("t@example.com", Role::Teacher).await;

        let req = full_course_form()
            .file("material_1", "again.mp4", "video/mp4", b"again")
            .into_request("/api/uploadCourse", Some(&token));
        let (status, json) = app.send(req).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["message"], "Unexpected field: material_1");
    }

    #[tokio::test]
    async fn media_failure_is_generic_and_cleans_up() {
        let app = make_test_app_with(RecordingMediaHost::fail_upload_at(2)).await;
        let (_, token) = app.user("t@example.com", Role::Teacher).await;

        let req = full_course_form().into_request("/api/uploadCourse", Some(&token));
        let (status, json) = app.send(req).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Something went wrong");
        assert_eq!(app.media.destroyed().len(), 1);
        assert!(CourseModel::find_all(&app.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn oversized_body_is_rejected() {
        let app = make_test_app().await;
        let (_, token) = app.user("t@example.com", Role::Teacher).await;
        let huge = vec![0u8; TEST_MAX_UPLOAD_BYTES + 1];

        let req = course_form()
            .file("courseThumbnail", "thumb.png", "image/png", b"png")
            .file("material_1", "lesson.mp4", "video/mp4", &huge)
            .into_request("/api/uploadCourse", Some(&token));
        let (status, _) = app.send(req).await;

        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
        assert!(app.media.uploads().is_empty());
    }

    #[tokio::test]
    async fn upload_requires_token() {
        let app = make_test_app().await;

        let req = full_course_form().into_request("/api/uploadCourse", None);
        let (status, _) = app.send(req).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn fetch_all_courses_for_any_caller() {
        let app = make_test_app().await;
        let (teacher, _) = app.user("t@example.com", Role::Teacher).await;
        let (_, student_token) = app.user("s@example.com", Role::Student).await;

        let (status, json) = app.get("/api/fetchAllCourses", Some(&student_token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"], serde_json::json!([]));

        CourseModel::create(&app.db, teacher.id, "A", "d", 10.0, "thumb", "video")
            .await
            .unwrap();
        let (status, json) = app.get("/api/fetchAllCourses", Some(&student_token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Fetch All Courses Successfully");
        assert_eq!(json["data"][0]["courseTitle"], "A");
        assert_eq!(json["data"][0]["userId"], teacher.id);
        assert_eq!(json["data"][0]["courseThumbnail"], "thumb");
        assert_eq!(json["data"][0]["material_1"], "video");
    }

    #[tokio::test]
    async fn teacher_kpi_counts_courses_and_enrollments() {
        let app = make_test_app().await;
        let (teacher, token) = app.user("t@example.com", Role::Teacher).await;
        let (s1, _) = app.user("s1@example.com", Role::Student).await;
        let (s2, _) = app.user("s2@example.com", Role::Student).await;

        let course = CourseModel::create(&app.db, teacher.id, "A", "d", 10.0, "t", "m")
            .await
            .unwrap();
        ApplyCourseModel::create(&app.db, s1.id, teacher.id, course.id, 10.0)
            .await
            .unwrap();
        ApplyCourseModel::create(&app.db, s2.id, teacher.id, course.id, 10.0)
            .await
            .unwrap();

        let (status, json) = app.get("/api/fetchTeacherKPI", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Fetch Teacher KPI Successfully");
        assert_eq!(json["data"]["totalCourse"], 1);
        assert_eq!(json["data"]["totalStudents"], 2);
    }

    #[tokio::test]
    async fn student_sees_only_purchased_courses() {
        let app = make_test_app().await;
        let (teacher, _) = app.user("t@example.com", Role::Teacher).await;
        let (student, token) = app.user("s@example.com", Role::Student).await;

        let a = CourseModel::create(&app.db, teacher.id, "A", "d", 10.0, "t", "m")
            .await
            .unwrap();
        CourseModel::create(&app.db, teacher.id, "Other", "d", 10.0, "t", "m")
            .await
            .unwrap();
        let b = CourseModel::create(&app.db, teacher.id, "B", "d", 20.0, "t", "m")
            .await
            .unwrap();
        ApplyCourseModel::create(&app.db, student.id, teacher.id, a.id, 10.0)
            .await
            .unwrap();
        ApplyCourseModel::create(&app.db, student.id, teacher.id, b.id, 20.0)
            .await
            .unwrap();

        let (status, json) = app.get("/api/fetchCourseByStudent", Some(&token)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], "Fetch All Courses Successfully");

        let data = json["data"].as_array().unwrap();
        let titles: Vec<_> = data.iter().map(|c| c["courseTitle"].as_str().unwrap()).collect();
        assert_eq!(titles, ["A", "B"]);
        assert_eq!(data[0]["id"], a.id);
        assert_eq!(data[1]["id"], b.id);
        for course in data {
            assert!(course.get("teacherId").is_none());
            assert!(course.get("studentId").is_none());
        }
    }
}
