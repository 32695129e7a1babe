//! Initial collection contents, used when a collection has never been stored.

use crate::records::{BlogPost, ResourceCategory, ResourceItem, ResourceKind, Role, Subject, User};

#[must_use]
pub fn seed_users() -> Vec<User> {
    vec![User {
        id: "u1".into(),
        name: "K.Sithara Nimsara".into(),
        email: "admin@knix.lk".into(),
        role: Role::Admin,
        joined_date: "2023-11-01".into(),
    }]
}

#[must_use]
pub fn seed_posts() -> Vec<BlogPost> {
    vec![
        BlogPost {
            id: "p1".into(),
            title: "ජීව විද්‍යාව - සෛල ව්‍යුහය (Cell Structure)".into(),
            content: "සෛල යනු ජීවීන්ගේ මූලික තැනුම් ඒකකයයි. (The cell is the basic structural and functional unit of life forms.) \n\n Key points to remember for MCQ:\n- Prokaryotic vs Eukaryotic cells\n- Function of Ribosomes\n- Structure of the Plasma Membrane".into(),
            subject: Subject::Biology,
            author: "K.Sithara".into(),
            date: "2025-02-27".into(),
            image_url: Some("https://picsum.photos/800/400?random=1".into()),
            likes: 45,
        },
        BlogPost {
            id: "p2".into(),
            title: "Physics - Electronics (ඉලෙක්ට්‍රොනික විද්‍යාව)".into(),
            content: "Operational Amplifiers (Op-Amps) are critical for the exam. Focus on:\n\n1. Ideal Op-Amp characteristics\n2. Inverting vs Non-inverting amplifiers\n3. Gain calculations".into(),
            subject: Subject::Physics,
            author: "K.Sithara".into(),
            date: "2025-02-26".into(),
            image_url: None,
            likes: 32,
        },
        BlogPost {
            id: "p3".into(),
            title: "Chemistry - Organic Conversions".into(),
            content: "Easy path to convert Benzene to Phenol. \n\nBenzene -> Nitrobenzene -> Aniline -> Diazonium Salt -> Phenol.".into(),
            subject: Subject::Chemistry,
            author: "K.Sithara".into(),
            date: "2025-02-25".into(),
            image_url: Some("https://picsum.photos/800/400?random=2".into()),
            likes: 89,
        },
    ]
}

fn item(id: &str, title: &str, kind: ResourceKind, size: &str, downloads: u32, description: &str, author: &str) -> ResourceItem {
    ResourceItem {
        id: id.into(),
        title: title.into(),
        kind,
        size: size.into(),
        downloads,
        url: None,
        description: Some(description.into()),
        author: Some(author.into()),
    }
}

#[must_use]
pub fn seed_resources() -> Vec<ResourceCategory> {
    const DOE: &str = "Department of Examinations";
    vec![
        ResourceCategory {
            category: Subject::Biology,
            items: vec![
                item(
                    "r1",
                    "2023 A/L Biology Past Paper (Sinhala Medium)",
                    ResourceKind::Pdf,
                    "4.2 MB",
                    1240,
                    "Official past paper including Part I (MCQ) and Part II (Essay) with structured questions.",
                    DOE,
                ),
                item(
                    "r2",
                    "Resource Book: Unit 5 (Sinhala)",
                    ResourceKind::Pdf,
                    "12.5 MB",
                    850,
                    "National Institute of Education (NIE) official resource book for Plant form and function.",
                    "NIE",
                ),
            ],
        },
        ResourceCategory {
            category: Subject::CombinedMaths,
            items: vec![
                item(
                    "r3",
                    "2023 A/L Combined Maths Past Paper",
                    ResourceKind::Pdf,
                    "5.1 MB",
                    1800,
                    "Complete paper covering Pure Mathematics and Applied Mathematics.",
                    DOE,
                ),
                item(
                    "r4",
                    "Trigonometry Short Notes",
                    ResourceKind::Image,
                    "1.2 MB",
                    3400,
                    "Quick revision cheat sheet for all trigonometric identities and formulas.",
                    "K.Sithara",
                ),
            ],
        },
        ResourceCategory {
            category: Subject::Physics,
            items: vec![
                item("r5", "2023 A/L Physics Past Paper", ResourceKind::Pdf, "3.8 MB", 1500, "Full past paper document.", DOE),
                item(
                    "r6",
                    "Electronics Model Questions",
                    ResourceKind::Pdf,
                    "2.1 MB",
                    900,
                    "Target questions for the Electronics unit with answers.",
                    "Physics Unit",
                ),
            ],
        },
        ResourceCategory {
            category: Subject::Chemistry,
            items: vec![
                item("r7", "2023 A/L Chemistry Past Paper", ResourceKind::Pdf, "4.5 MB", 1100, "Chemistry past paper 2023.", DOE),
                item(
                    "r8",
                    "Organic Chemistry Road Map",
                    ResourceKind::Image,
                    "1.8 MB",
                    2200,
                    "Visual map for organic reaction conversions.",
                    "Knix Edu",
                ),
            ],
        },
    ]
}
