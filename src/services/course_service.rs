use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::{require_owner_or_admin, require_staff, require_student, Principal},
    errors::{AppError, AppResult},
    models::{
        domain::{Course, CourseUpdate, CourseVisibility, Enrollment, UserRole},
        dto::{
            request::{CourseListParams, CreateCourseRequest, EnrollRequest, UpdateCourseRequest},
            response::{CoursePage, EnrollmentList},
        },
    },
    repositories::{CourseRepository, EnrollmentRepository, UserRepository},
};

pub struct CourseService {
    courses: Arc<dyn CourseRepository>,
    enrollments: Arc<dyn EnrollmentRepository>,
    users: Arc<dyn UserRepository>,
}

impl CourseService {
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        enrollments: Arc<dyn EnrollmentRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            courses,
            enrollments,
            users,
        }
    }

    pub async fn create(
        &self,
        principal: &Principal,
        request: CreateCourseRequest,
    ) -> AppResult<Course> {
        require_staff(principal, "Only teachers can create courses")?;

        let teacher_name = self
            .users
            .find_by_id(&principal.user_id)
            .await?
            .map(|user| user.display_name)
            .unwrap_or_else(|| principal.email.clone());

        let now = Utc::now();
        let course = Course {
            id: Uuid::new_v4().to_string(),
            title: request.title.trim().to_string(),
            description: request.description,
            syllabus: request.syllabus,
            teacher_id: principal.user_id.clone(),
            teacher_name,
            category: request.category,
            difficulty: request.difficulty,
            thumbnail: request.thumbnail,
            materials: request.materials,
            enrollment_count: 0,
            is_published: false,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        let created = self.courses.create(course).await?;
        log::info!("Teacher {} created course {}", principal.user_id, created.id);
        Ok(created)
    }

    pub async fn list(
        &self,
        principal: &Principal,
        params: &CourseListParams,
    ) -> AppResult<CoursePage> {
        let visibility = match principal.role {
            UserRole::Admin => CourseVisibility::All,
            UserRole::Teacher if params.own_courses_only() => {
                CourseVisibility::OwnedBy(principal.user_id.clone())
            }
            UserRole::Teacher | UserRole::Student => CourseVisibility::Published,
        };

        let courses = self
            .courses
            .list(visibility, params.offset(), params.page_size())
            .await?;

        Ok(CoursePage {
            courses,
            page: params.page(),
            page_size: params.page_size(),
        })
    }

    pub async fn get(&self, principal: &Principal, id: &str) -> AppResult<Course> {
        let course = self.find_live(id).await?;

        let visible = course.is_published
            || principal.is_admin()
            || (principal.role == UserRole::Teacher && course.teacher_id == principal.user_id);
        if !visible {
            return Err(AppError::Forbidden(
                "This course is not published".to_string(),
            ));
        }
        Ok(course)
    }

    pub async fn update(
        &self,
        principal: &Principal,
        id: &str,
        request: UpdateCourseRequest,
    ) -> AppResult<Course> {
        require_staff(principal, "Only teachers can update courses")?;
        let course = self.find_live(id).await?;
        require_owner_or_admin(
            principal,
            &course.teacher_id,
            "You can only update your own courses",
        )?;

        let update = CourseUpdate::from(request);
        if update.is_empty() {
            return Err(AppError::ValidationError("No fields to update".to_string()));
        }
        self.courses.update(id, update).await
    }

    pub async fn delete(&self, principal: &Principal, id: &str) -> AppResult<()> {
        require_staff(principal, "Only teachers can delete courses")?;
        let course = self.find_live(id).await?;
        require_owner_or_admin(
            principal,
            &course.teacher_id,
            "You can only delete your own courses",
        )?;

        self.courses.soft_delete(id).await?;
        log::info!("Course {} deleted by {}", id, principal.user_id);
        Ok(())
    }

    pub async fn enroll(
        &self,
        principal: &Principal,
        request: EnrollRequest,
    ) -> AppResult<Enrollment> {
        require_student(principal, "Only students can enroll in courses")?;

        let course = self.find_live(&request.course_id).await?;
        if !course.is_published {
            return Err(AppError::BadRequest(
                "Course is not available for enrollment".to_string(),
            ));
        }

        let enrollment = self
            .enrollments
            .create(Enrollment::new(&principal.user_id, &course.id))
            .await?;

        if let Err(err) = self.courses.increment_enrollment_count(&course.id).await {
            log::warn!(
                "Failed to increment enrollment count for course {}: {}",
                course.id,
                err
            );
        }

        log::info!("Student {} enrolled in course {}", principal.user_id, course.id);
        Ok(enrollment)
    }

    pub async fn my_enrollments(&self, principal: &Principal) -> AppResult<EnrollmentList> {
        require_student(principal, "Only students have enrollments")?;
        let enrollments = self.enrollments.list_for_student(&principal.user_id).await?;
        Ok(EnrollmentList { enrollments })
    }

    async fn find_live(&self, id: &str) -> AppResult<Course> {
        self.courses
            .find_by_id(id)
            .await?
            .filter(|course| !course.is_deleted)
            .ok_or_else(|| AppError::NotFound("Course not found".to_string()))
    }
}
