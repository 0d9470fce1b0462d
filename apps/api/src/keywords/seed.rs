//! Default seed data for the keyword store: the job categories, a small
//! sample keyword list per category, and the sample keyword sets.
//!
//! Everything is inserted with INSERT OR IGNORE, so seeding is safe to run
//! on every startup.

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

const CATEGORIES: &[(&str, &str)] = &[
    (
        "Technology & IT",
        "Software development, IT infrastructure, cybersecurity",
    ),
    ("Marketing & Sales", "Digital marketing, sales, advertising, SEO"),
    (
        "Content Creation",
        "Writing, editing, content strategy, blogging",
    ),
    ("Design & Creative", "Graphic design, UX/UI, multimedia"),
    (
        "Business & Management",
        "Project management, operations, administration",
    ),
    (
        "Healthcare",
        "Medical professions, nursing, healthcare administration",
    ),
    (
        "Education",
        "Teaching, academic research, educational administration",
    ),
    (
        "Engineering",
        "Civil, mechanical, electrical, chemical engineering",
    ),
    ("Finance", "Accounting, banking, financial analysis"),
    ("Hospitality", "Hotel management, culinary arts, tourism"),
    ("Legal", "Law, paralegal, compliance"),
    (
        "Science & Research",
        "Scientific research, laboratory work, R&D",
    ),
    (
        "Skilled Trades",
        "Construction, manufacturing, technical trades",
    ),
    (
        "Human Resources",
        "Recruitment, talent management, HR operations",
    ),
];

const SAMPLE_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "Technology & IT",
        &[
            "Python",
            "JavaScript",
            "SQL",
            "Cloud Computing",
            "Cybersecurity",
            "DevOps",
            "Machine Learning",
            "API Development",
            "Docker",
            "Kubernetes",
        ],
    ),
    (
        "Marketing & Sales",
        &[
            "SEO",
            "SEM",
            "Google Analytics",
            "Social Media Marketing",
            "Content Marketing",
            "Email Marketing",
            "CRM",
            "Sales Funnel",
            "Market Research",
            "Brand Management",
        ],
    ),
    (
        "Content Creation",
        &[
            "Content Strategy",
            "Copywriting",
            "Blogging",
            "Technical Writing",
            "Editing",
            "Proofreading",
            "Content Management",
            "WordPress",
            "Ghostwriting",
            "Storytelling",
        ],
    ),
    (
        "Design & Creative",
        &[
            "Graphic Design",
            "Figma",
            "Adobe Photoshop",
            "UX Research",
            "Illustration",
            "Typography",
        ],
    ),
    (
        "Business & Management",
        &[
            "Project Management",
            "Agile",
            "Scrum",
            "Operations",
            "Stakeholder Management",
            "Budgeting",
        ],
    ),
    (
        "Healthcare",
        &[
            "Patient Care",
            "Nursing",
            "Clinical Research",
            "EMR",
            "HIPAA",
            "Care Planning",
        ],
    ),
    (
        "Education",
        &[
            "Curriculum Development",
            "Lesson Planning",
            "Classroom Management",
            "Assessment",
            "E-Learning",
        ],
    ),
    (
        "Engineering",
        &[
            "AutoCAD",
            "Structural Analysis",
            "HVAC",
            "PLC Programming",
            "Process Engineering",
            "Six Sigma",
        ],
    ),
    (
        "Finance",
        &[
            "Financial Analysis",
            "Accounting",
            "GAAP",
            "Forecasting",
            "Auditing",
            "Financial Modeling",
        ],
    ),
    (
        "Hospitality",
        &[
            "Food Safety",
            "Event Planning",
            "Front Desk",
            "Inventory Management",
            "Guest Relations",
        ],
    ),
    (
        "Legal",
        &[
            "Contract Law",
            "Legal Research",
            "Compliance",
            "Litigation",
            "Due Diligence",
        ],
    ),
    (
        "Science & Research",
        &[
            "Data Analysis",
            "Laboratory Techniques",
            "Statistics",
            "Grant Writing",
            "Peer Review",
        ],
    ),
    (
        "Skilled Trades",
        &[
            "Welding",
            "Carpentry",
            "Electrical Wiring",
            "Blueprint Reading",
            "OSHA",
        ],
    ),
    (
        "Human Resources",
        &[
            "Recruitment",
            "Onboarding",
            "Payroll",
            "Performance Management",
            "Employee Relations",
            "Talent Acquisition",
        ],
    ),
];

// Sample sets for the (schema-only) weighted scoring extension point.
const KEYWORD_SETS: &[(&str, &str)] = &[
    (
        "SEO Content Writer",
        "Keywords for SEO content writer positions",
    ),
    (
        "Software Developer",
        "Keywords for software developer positions",
    ),
    ("Digital Marketer", "Keywords for digital marketing roles"),
];

/// Ensures the default categories, sample keywords, and keyword sets exist.
pub async fn seed_defaults(pool: &SqlitePool) -> Result<()> {
    for (name, description) in CATEGORIES {
        sqlx::query("INSERT OR IGNORE INTO job_categories (name, description) VALUES ($1, $2)")
            .bind(name)
            .bind(description)
            .execute(pool)
            .await?;
    }

    for (category, keywords) in SAMPLE_KEYWORDS {
        let category_id: Option<i64> =
            sqlx::query_scalar("SELECT id FROM job_categories WHERE name = $1")
                .bind(category)
                .fetch_optional(pool)
                .await?;
        let Some(category_id) = category_id else {
            continue;
        };
        for keyword in *keywords {
            sqlx::query("INSERT OR IGNORE INTO keywords (keyword, category_id) VALUES ($1, $2)")
                .bind(keyword)
                .bind(category_id)
                .execute(pool)
                .await?;
        }
    }

    for (name, description) in KEYWORD_SETS {
        sqlx::query("INSERT OR IGNORE INTO keyword_sets (name, description) VALUES ($1, $2)")
            .bind(name)
            .bind(description)
            .execute(pool)
            .await?;
    }

    info!("Seed data ensured ({} categories)", CATEGORIES.len());
    Ok(())
}
