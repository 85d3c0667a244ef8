//! The sample profile and the routine that loads it into an empty store.

use std::fs;
use std::path::Path;
use log::info;
use crate::model::{Education, Links, Profile, ProfileInput, Project, Work};
use crate::{ProfileStore, Result};

/// Clears `store` and inserts `profile` as its only document.
pub async fn seed(store: &dyn ProfileStore, profile: ProfileInput) -> Result<Profile> {
    let removed = store.clear_all().await?;
    info!("Cleared {} existing profile(s)", removed);

    let created = store.create(profile).await?;
    info!("Sample profile created successfully ({})", created.email);
    Ok(created)
}

/// Reads a [`ProfileInput`] from a JSON file.
pub fn load_fixture<P: AsRef<Path>>(path: P) -> Result<ProfileInput> {
    let content = fs::read(path.as_ref())?;
    Ok(serde_json::from_slice(&content)?)
}

fn s(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// The built-in sample candidate.
pub fn sample_profile() -> ProfileInput {
    ProfileInput {
        name: s("Abhineet Mathur"),
        email: s("abhineet.mathur@example.com"),
        education: vec![Education {
            institution: s("Manipal University Jaipur"),
            degree: s("Bachelor of Computer Science"),
            year: s("2022"),
        }],
        skills: [
            "JavaScript",
            "Python",
            "React",
            "Node.js",
            "MongoDB",
            "Express.js",
            "HTML",
            "CSS",
            "Git",
            "Docker",
        ]
        .iter()
        .map(|skill| skill.to_string())
        .collect(),
        projects: vec![
            Project {
                title: s("E-commerce Platform"),
                description: s("Full-stack e-commerce application with user authentication, payment integration, and admin dashboard"),
                links: vec![
                    "https://github.com/abhineetmathur/ecommerce".to_string(),
                    "https://myecommerce.vercel.app".to_string(),
                ],
            },
            Project {
                title: s("Task Management App"),
                description: s("React-based task management application with drag-and-drop functionality and real-time updates"),
                links: vec![
                    "https://github.com/abhineetmathur/taskapp".to_string(),
                    "https://mytasks.netlify.app".to_string(),
                ],
            },
            Project {
                title: s("Weather Dashboard"),
                description: s("Python Flask application that displays weather data with interactive charts and forecasting"),
                links: vec!["https://github.com/abhineetmathur/weather-dashboard".to_string()],
            },
        ],
        work: vec![
            Work {
                company: s("StartupXYZ"),
                position: s("Frontend Developer"),
                duration: s("2022 - Present"),
                description: s("Developed responsive web applications using React and TypeScript. Collaborated with design team to implement pixel-perfect UIs."),
            },
            Work {
                company: s("Tech Solutions Inc"),
                position: s("Junior Full Stack Developer"),
                duration: s("2021 - 2022"),
                description: s("Built REST APIs using Node.js and Express. Worked on database optimization and implemented automated testing."),
            },
        ],
        links: Some(Links {
            github: s("https://github.com/abhineetmathur"),
            linkedin: s("https://www.linkedin.com/in/03abhi"),
            portfolio: s("https://abhineetmathur.dev"),
        }),
    }
}
