use crate::user::User;
use serde::{Deserialize, Serialize};

pub const ALL_CATEGORIES: &str = "All";

pub const CATEGORIES: [&str; 4] = [
    "Computer Science",
    "Artificial Intelligence",
    "Development",
    "Security",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub title: String,
    pub video_url: String,
    pub duration: String,
    pub is_completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: String,
    pub title: String,
    pub instructor: String,
    pub description: String,
    pub category: String,
    pub rating: f32,
    pub students_count: u32,
    pub duration: String,
    pub thumbnail: String,
    pub lessons: Vec<Lesson>,
}

/// Category selector of the catalog view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(selector: &str) -> Self {
        let selector = selector.trim();
        if selector.is_empty() || selector == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(selector.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => ALL_CATEGORIES,
            CategoryFilter::Only(c) => c,
        }
    }

    pub fn matches(&self, course: &Course) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(c) => course.category == *c,
        }
    }

    /// "All" followed by every known category, in display order.
    pub fn choices() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(CATEGORIES.iter().map(|c| CategoryFilter::Only(c.to_string())))
            .collect()
    }
}

fn matches_query(course: &Course, needle: &str) -> bool {
    course.title.to_lowercase().contains(needle)
        || course.description.to_lowercase().contains(needle)
}

/// Narrow the catalog by category and a case-insensitive substring of
/// title or description. Keeps catalog order; an empty query matches all.
pub fn filter_courses<'a>(
    courses: &'a [Course],
    category: &CategoryFilter,
    query: &str,
) -> Vec<&'a Course> {
    let needle = query.to_lowercase();
    courses
        .iter()
        .filter(|c| category.matches(c) && matches_query(c, &needle))
        .collect()
}

pub fn find_course<'a>(courses: &'a [Course], id: &str) -> Option<&'a Course> {
    courses.iter().find(|c| c.id == id)
}

/// Courses the user is enrolled in, in catalog order. Unknown ids are ignored.
pub fn enrolled_courses<'a>(courses: &'a [Course], user: &User) -> Vec<&'a Course> {
    courses.iter().filter(|c| user.is_enrolled(&c.id)).collect()
}

fn lesson(id: &str, title: &str, video: &str, duration: &str, done: bool) -> Lesson {
    Lesson {
        id: id.to_string(),
        title: title.to_string(),
        video_url: video.to_string(),
        duration: duration.to_string(),
        is_completed: done,
    }
}

#[allow(clippy::too_many_arguments)]
fn course(
    id: &str,
    title: &str,
    instructor: &str,
    description: &str,
    category: &str,
    rating: f32,
    students_count: u32,
    duration: &str,
    seed: &str,
    lessons: Vec<Lesson>,
) -> Course {
    Course {
        id: id.to_string(),
        title: title.to_string(),
        instructor: instructor.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        rating,
        students_count,
        duration: duration.to_string(),
        thumbnail: format!("https://picsum.photos/seed/{seed}/800/450"),
        lessons,
    }
}

pub fn mock_catalog() -> Vec<Course> {
    vec![
        course(
            "c1",
            "Advanced React Architecture",
            "Dr. Sarah Smith",
            "Learn to build scalable frontend systems with modern React patterns.",
            "Computer Science",
            4.8,
            1250,
            "12h 30m",
            "react",
            vec![
                lesson(
                    "l1",
                    "Introduction to Atomic Design",
                    "https://example.com/v1",
                    "15:00",
                    true,
                ),
                lesson(
                    "l2",
                    "State Management with Hooks",
                    "https://example.com/v2",
                    "25:00",
                    false,
                ),
            ],
        ),
        course(
            "c2",
            "Machine Learning Fundamentals",
            "Prof. Alan Turing",
            "A deep dive into supervised and unsupervised learning techniques.",
            "Artificial Intelligence",
            4.9,
            3400,
            "20h 45m",
            "ml",
            vec![lesson(
                "l3",
                "Linear Regression Basics",
                "https://example.com/v3",
                "30:00",
                false,
            )],
        ),
        course(
            "c3",
            "Data Structures and Algorithms",
            "Jane Doe",
            "Master the core concepts of software engineering.",
            "Computer Science",
            4.7,
            8900,
            "45h 00m",
            "dsa",
            vec![],
        ),
        course(
            "c4",
            "Full Stack Web Development",
            "Mark Wilson",
            "From HTML to Deployment: A complete career track.",
            "Development",
            4.6,
            5600,
            "60h 00m",
            "web",
            vec![],
        ),
        course(
            "c5",
            "Cyber Security Essentials",
            "Kevin Mitnick",
            "Protect your digital assets with advanced security protocols.",
            "Security",
            4.5,
            2100,
            "15h 20m",
            "sec",
            vec![],
        ),
    ]
}

/// "1250" -> "1,250"
pub fn group_thousands(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_course() -> impl Strategy<Value = Course> {
        (
            "[a-cA-C ]{0,8}",
            "[a-cA-C ]{0,12}",
            prop::sample::select(CATEGORIES.to_vec()),
        )
            .prop_map(|(title, description, category)| Course {
                id: String::new(),
                title,
                instructor: "x".to_string(),
                description,
                category: category.to_string(),
                rating: 4.0,
                students_count: 1,
                duration: "1h".to_string(),
                thumbnail: String::new(),
                lessons: vec![],
            })
    }

    fn arb_catalog() -> impl Strategy<Value = Vec<Course>> {
        prop::collection::vec(arb_course(), 0..12).prop_map(|mut courses| {
            for (i, c) in courses.iter_mut().enumerate() {
                c.id = format!("c{i}");
            }
            courses
        })
    }

    fn arb_filter() -> impl Strategy<Value = CategoryFilter> {
        prop::sample::select(CategoryFilter::choices())
    }

    fn expected(course: &Course, category: &CategoryFilter, query: &str) -> bool {
        let q = query.to_lowercase();
        category.matches(course)
            && (course.title.to_lowercase().contains(&q)
                || course.description.to_lowercase().contains(&q))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_results_are_exactly_the_matching_courses(
            catalog in arb_catalog(),
            category in arb_filter(),
            query in "[a-cA-C ]{0,3}",
        ) {
            let found = filter_courses(&catalog, &category, &query);
            for c in &found {
                prop_assert!(expected(c, &category, &query));
            }
            let wanted: Vec<&str> = catalog
                .iter()
                .filter(|c| expected(c, &category, &query))
                .map(|c| c.id.as_str())
                .collect();
            let got: Vec<&str> = found.iter().map(|c| c.id.as_str()).collect();
            prop_assert_eq!(got, wanted);
        }

        #[test]
        fn prop_filtering_is_idempotent(
            catalog in arb_catalog(),
            category in arb_filter(),
            query in "[a-cA-C ]{0,3}",
        ) {
            let once: Vec<Course> = filter_courses(&catalog, &category, &query)
                .into_iter()
                .cloned()
                .collect();
            let twice: Vec<Course> = filter_courses(&once, &category, &query)
                .into_iter()
                .cloned()
                .collect();
            prop_assert_eq!(once, twice);
        }
    }
}
