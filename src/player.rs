use crate::catalog::{Course, Lesson};
use std::collections::BTreeSet;

pub const PLACEHOLDER_LESSON_ID: &str = "placeholder";

/// Stand-in shown when a course has no lessons yet.
pub fn placeholder_lesson() -> Lesson {
    Lesson {
        id: PLACEHOLDER_LESSON_ID.to_string(),
        title: "Welcome to the Course".to_string(),
        video_url: "https://www.w3schools.com/html/mov_bbb.mp4".to_string(),
        duration: "02:30".to_string(),
        is_completed: false,
    }
}

/// Viewing session of one course. Completion marks live only here and are
/// never written back to the course.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSession {
    course: Course,
    lessons: Vec<Lesson>,
    current: usize,
    completed: BTreeSet<String>,
}

impl PlayerSession {
    pub fn new(course: Course) -> Self {
        let lessons = if course.lessons.is_empty() {
            vec![placeholder_lesson()]
        } else {
            course.lessons.clone()
        };
        let completed = course
            .lessons
            .iter()
            .filter(|l| l.is_completed)
            .map(|l| l.id.clone())
            .collect();
        Self {
            course,
            lessons,
            current: 0,
            completed,
        }
    }

    pub fn course(&self) -> &Course {
        &self.course
    }

    /// Lessons listed in the sidebar; the placeholder when the course is empty.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    pub fn current_lesson(&self) -> &Lesson {
        &self.lessons[self.current]
    }

    /// Returns false when the id is not part of the list.
    pub fn select(&mut self, lesson_id: &str) -> bool {
        match self.lessons.iter().position(|l| l.id == lesson_id) {
            Some(idx) => {
                self.current = idx;
                true
            }
            None => false,
        }
    }

    pub fn has_lesson(&self, lesson_id: &str) -> bool {
        self.lessons.iter().any(|l| l.id == lesson_id)
    }

    /// Adds the id when absent, removes it when present. Callers check
    /// `has_lesson` first.
    pub fn toggle(&mut self, lesson_id: &str) {
        if !self.completed.remove(lesson_id) {
            self.completed.insert(lesson_id.to_string());
        }
    }

    pub fn is_completed(&self, lesson_id: &str) -> bool {
        self.completed.contains(lesson_id)
    }

    #[cfg(test)]
    pub fn completed(&self) -> &BTreeSet<String> {
        &self.completed
    }

    pub fn progress_label(&self) -> String {
        format!(
            "{}/{} Lessons",
            self.completed.len(),
            self.course.lessons.len().max(1)
        )
    }

    pub fn lesson_summary(&self) -> String {
        format!(
            "This module covers the core principles of {}. In this lesson we dive deep into {}. \
             Follow along with the exercises in the resources tab.",
            self.course.title,
            self.current_lesson().title.to_lowercase()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{find_course, mock_catalog};

    fn session(id: &str) -> PlayerSession {
        let catalog = mock_catalog();
        PlayerSession::new(find_course(&catalog, id).unwrap().clone())
    }

    #[test]
    fn starts_on_first_lesson_with_seeded_completion() {
        let s = session("c1");
        assert_eq!(s.current_lesson().id, "l1");
        assert!(s.is_completed("l1"));
        assert!(!s.is_completed("l2"));
        assert_eq!(s.progress_label(), "1/2 Lessons");
    }

    #[test]
    fn empty_course_gets_placeholder() {
        let s = session("c3");
        assert_eq!(s.lessons().len(), 1);
        assert_eq!(s.current_lesson().id, PLACEHOLDER_LESSON_ID);
        assert_eq!(s.progress_label(), "0/1 Lessons");
    }

    #[test]
    fn select_changes_current_lesson() {
        let mut s = session("c1");
        assert!(s.select("l2"));
        assert_eq!(s.current_lesson().title, "State Management with Hooks");
        assert!(!s.select("nope"));
        assert_eq!(s.current_lesson().id, "l2");
    }

    #[test]
    fn toggle_twice_restores_the_set() {
        let mut s = session("c1");
        let before = s.completed().clone();
        s.toggle("l2");
        assert_eq!(s.completed().len(), before.len() + 1);
        s.toggle("l2");
        assert_eq!(s.completed(), &before);
    }

    #[test]
    fn toggle_does_not_touch_the_course() {
        let mut s = session("c1");
        s.toggle("l1");
        assert!(!s.is_completed("l1"));
        assert!(s.course().lessons[0].is_completed);
    }

    #[test]
    fn placeholder_can_be_completed() {
        let mut s = session("c4");
        assert!(s.has_lesson(PLACEHOLDER_LESSON_ID));
        assert!(!s.has_lesson("l1"));
        s.toggle(PLACEHOLDER_LESSON_ID);
        assert!(s.is_completed(PLACEHOLDER_LESSON_ID));
        assert_eq!(s.progress_label(), "1/1 Lessons");
    }

    #[test]
    fn summary_mentions_course_and_lesson() {
        let s = session("c2");
        let text = s.lesson_summary();
        assert!(text.contains("Machine Learning Fundamentals"));
        assert!(text.contains("linear regression basics"));
    }
}
