//! Static pages: project documentation and viva preparation.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeBlock {
    pub id: &'static str,
    pub title: &'static str,
    pub language: &'static str,
    pub code: &'static str,
}

pub const DOCS_TITLE: &str = "Technical Deliverables";
pub const DOCS_INTRO: &str = "The following source code makes up the core logic of the Java \
    (backend), MySQL (database) and Python (AI engine) modules of the project.";

const SQL_SCHEMA: &str = r#"-- DATABASE INITIALIZATION
CREATE DATABASE IF NOT EXISTS edu_ai_db;
USE edu_ai_db;

-- USERS TABLE
CREATE TABLE users (
    id INT AUTO_INCREMENT PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    email VARCHAR(100) UNIQUE NOT NULL,
    password VARCHAR(255) NOT NULL,
    role ENUM('STUDENT', 'ADMIN') DEFAULT 'STUDENT',
    interests TEXT,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- COURSES TABLE
CREATE TABLE courses (
    id INT AUTO_INCREMENT PRIMARY KEY,
    title VARCHAR(200) NOT NULL,
    instructor VARCHAR(100),
    description TEXT,
    category VARCHAR(50),
    price DECIMAL(10, 2),
    rating FLOAT DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

-- ENROLLMENTS TABLE
CREATE TABLE enrollments (
    id INT AUTO_INCREMENT PRIMARY KEY,
    user_id INT,
    course_id INT,
    progress INT DEFAULT 0,
    status ENUM('ACTIVE', 'COMPLETED') DEFAULT 'ACTIVE',
    enrolled_on TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    FOREIGN KEY (user_id) REFERENCES users(id),
    FOREIGN KEY (course_id) REFERENCES courses(id)
);"#;

const JAVA_SERVLET: &str = r#"package com.eduai.servlets;

import java.io.IOException;
import java.sql.*;
import javax.servlet.ServletException;
import javax.servlet.annotation.WebServlet;
import javax.servlet.http.*;

@WebServlet("/CourseServlet")
public class CourseServlet extends HttpServlet {

    protected void doGet(HttpServletRequest request, HttpServletResponse response)
            throws ServletException, IOException {
        String action = request.getParameter("action");
        if ("list".equals(action)) {
            listCourses(request, response);
        }
    }

    private void listCourses(HttpServletRequest request, HttpServletResponse response) {
        try {
            Connection con = DriverManager.getConnection("jdbc:mysql://localhost:3306/edu_ai_db", "root", "root");
            Statement st = con.createStatement();
            ResultSet rs = st.executeQuery("SELECT * FROM courses");

            request.setAttribute("courseList", rs);
            request.getRequestDispatcher("catalog.jsp").forward(request, response);
        } catch (Exception e) {
            e.printStackTrace();
        }
    }
}"#;

const PYTHON_ENGINE: &str = r#"import pandas as pd
from sklearn.feature_extraction.text import TfidfVectorizer
from sklearn.metrics.pairwise import cosine_similarity

courses = pd.DataFrame([
    {'id': 1, 'title': 'React Basics', 'tags': 'frontend web js'},
    {'id': 2, 'title': 'Python AI', 'tags': 'python ml data'},
    {'id': 3, 'title': 'Cyber Sec', 'tags': 'network security privacy'}
])

def get_recommendations(user_interest_str):
    tfidf = TfidfVectorizer(stop_words='english')
    tfidf_matrix = tfidf.fit_transform(courses['tags'])
    user_vec = tfidf.transform([user_interest_str])
    scores = cosine_similarity(user_vec, tfidf_matrix).flatten()
    indices = scores.argsort()[-2:][::-1]
    return courses.iloc[indices][['id', 'title']]

print(get_recommendations("I love python and machine learning"))"#;

pub const CODE_BLOCKS: [CodeBlock; 3] = [
    CodeBlock {
        id: "sql",
        title: "MySQL Database Schema",
        language: "sql",
        code: SQL_SCHEMA,
    },
    CodeBlock {
        id: "java",
        title: "Course Management Servlet (Java)",
        language: "java",
        code: JAVA_SERVLET,
    },
    CodeBlock {
        id: "python",
        title: "AI Recommendation Engine (Python)",
        language: "python",
        code: PYTHON_ENGINE,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaPair {
    pub question: &'static str,
    pub answer: &'static str,
}

const fn qa(question: &'static str, answer: &'static str) -> QaPair {
    QaPair { question, answer }
}

pub const VIVA_TITLE: &str = "Viva Voce Preparation";
pub const VIVA_INTRO: &str =
    "Be prepared for your project defense with these common questions and detailed technical answers.";

pub const VIVA_QA: [QaPair; 12] = [
    qa(
        "What is the primary objective of your project?",
        "To build a modern e-learning platform that tackles content overload by giving each student personalized course recommendations using AI.",
    ),
    qa(
        "How does the AI Recommendation Engine work?",
        "It takes a hybrid approach: student interests drive content-based matching, cross-referenced with trending and highly rated courses in the spirit of collaborative filtering.",
    ),
    qa(
        "Explain the role of Servlets in your project.",
        "Servlets are the controller of the MVC architecture. They receive HTTP requests, talk to the database (model) and forward data to the JSP pages (view).",
    ),
    qa(
        "Why did you choose Python for the AI module?",
        "Libraries such as scikit-learn and pandas make data manipulation and similarity algorithms for recommendations straightforward.",
    ),
    qa(
        "How do you handle session management?",
        "The HttpSession object stores user details on login so that only authenticated users reach the dashboard.",
    ),
    qa(
        "What is JDBC and why is it used?",
        "JDBC (Java Database Connectivity) is the API that connects the Java application to MySQL for executing SQL queries.",
    ),
    qa(
        "Explain the database normalization in your schema.",
        "The schema follows third normal form: users, courses and enrollments live in separate tables linked by foreign keys, removing redundancy.",
    ),
    qa(
        "What were the major challenges you faced?",
        "Integrating the Java backend with the Python script. It was solved with API-based communication or by running the script through ProcessBuilder.",
    ),
    qa(
        "How secure is your platform?",
        "Session tracking and input validation provide basic security. A production deployment would add BCrypt password hashing and SSL.",
    ),
    qa(
        "What is the future scope of this project?",
        "Live proctored exams using computer vision, real-time chatbots for student support and a collaborative learning forum.",
    ),
    qa(
        "What is the importance of a 'Progress Tracker'?",
        "It keeps students consistent and lets the system generate learning insights from completion speed and quiz scores.",
    ),
    qa(
        "Describe your project's architecture.",
        "A multi-tier design: frontend (React/HTML), backend (Java Servlets), logic layer (Python AI) and data tier (MySQL).",
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_block_ids_are_unique() {
        let mut ids: Vec<&str> = CODE_BLOCKS.iter().map(|b| b.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), CODE_BLOCKS.len());
    }

    #[test]
    fn schema_block_defines_enrollments() {
        let sql = CODE_BLOCKS.iter().find(|b| b.language == "sql").unwrap();
        assert!(sql.code.contains("CREATE TABLE enrollments"));
    }

    #[test]
    fn twelve_viva_questions() {
        assert_eq!(VIVA_QA.len(), 12);
        assert!(VIVA_QA.iter().all(|p| p.question.ends_with('?')));
    }
}
