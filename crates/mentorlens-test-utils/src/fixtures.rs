//! Entity builders and a small, varied sample dataset.

use mentorlens_common::{
    Award, Dataset, Difficulty, Mentor, Project, ProjectStatus, Publication, PublicationType,
};

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A valid intermediate project with no keywords, skills or requirements.
pub fn project(id: &str) -> Project {
    Project {
        id: id.to_string(),
        title: format!("Project {id}"),
        mentor_id: "m1".to_string(),
        mentor_name: "Li Wei".to_string(),
        keywords: vec![],
        description: String::new(),
        status: ProjectStatus::Ongoing,
        category: "Artificial Intelligence".to_string(),
        difficulty: Difficulty::Intermediate,
        estimated_duration: 6,
        requirements: vec![],
        deliverables: vec![],
        skills: vec![],
        created_at: "2024-09-01T00:00:00Z".to_string(),
        updated_at: "2024-09-01T00:00:00Z".to_string(),
    }
}

/// A valid, available mentor rated 4.0.
pub fn mentor(id: &str) -> Mentor {
    Mentor {
        id: id.to_string(),
        name: format!("Mentor {id}"),
        title: "Professor".to_string(),
        department: "Computer Science".to_string(),
        email: format!("{id}@example.edu"),
        office: "B-101".to_string(),
        research_fields: vec![],
        description: String::new(),
        education: vec![],
        experience: vec![],
        publications: vec![],
        awards: vec![],
        rating: 4.0,
        review_count: 8,
        student_count: 3,
        is_available: true,
        tags: vec![],
        created_at: "2024-09-01T00:00:00Z".to_string(),
        updated_at: "2024-09-01T00:00:00Z".to_string(),
    }
}

pub fn publication(i: usize) -> Publication {
    Publication {
        id: format!("pub-{i}"),
        title: format!("Paper {i}"),
        authors: vec!["A. Author".to_string()],
        journal: "Journal of Examples".to_string(),
        year: 2020,
        citations: 10,
        kind: PublicationType::Journal,
    }
}

pub fn award(i: usize) -> Award {
    Award {
        id: format!("award-{i}"),
        title: format!("Award {i}"),
        organization: "Example Society".to_string(),
        year: 2021,
        description: String::new(),
    }
}

/// Three mentors and five projects spanning every status and difficulty.
pub fn sample_dataset() -> Dataset {
    let mut li = mentor("m1");
    li.name = "Li Wei".to_string();
    li.research_fields = strings(&["Machine Learning", "Computer Vision"]);
    li.description = "Works on trustworthy AI for healthcare".to_string();
    li.rating = 4.6;
    li.review_count = 14;
    li.student_count = 9;
    li.publications = (0..3).map(publication).collect();
    li.awards = vec![award(0)];

    let mut zhang = mentor("m2");
    zhang.name = "Zhang Min".to_string();
    zhang.department = "Environmental Engineering".to_string();
    zhang.research_fields = strings(&["Water Treatment"]);
    zhang.description = "River and lake restoration".to_string();
    zhang.rating = 3.8;
    zhang.review_count = 6;
    zhang.student_count = 2;
    zhang.is_available = false;

    let mut chen = mentor("m3");
    chen.name = "Chen Jie".to_string();
    chen.research_fields = strings(&["Distributed Systems", "Machine Learning"]);
    chen.description = "Fault-tolerant storage".to_string();
    chen.rating = 4.1;
    chen.review_count = 3;
    chen.student_count = 4;

    let mut p1 = project("p1");
    p1.title = "Medical image segmentation".to_string();
    p1.keywords = strings(&["AI", "医疗"]);
    p1.description = "Segment tumours in CT scans".to_string();
    p1.difficulty = Difficulty::Advanced;
    p1.estimated_duration = 10;
    p1.requirements = strings(&["Python", "Linear algebra", "PyTorch", "English"]);
    p1.skills = strings(&["Python", "PyTorch", "OpenCV", "Statistics"]);

    let mut p2 = project("p2");
    p2.title = "River quality monitoring".to_string();
    p2.mentor_id = "m2".to_string();
    p2.mentor_name = "Zhang Min".to_string();
    p2.keywords = strings(&["环境", "传感器"]);
    p2.description = "Low-cost sensor network for water quality".to_string();
    p2.status = ProjectStatus::Completed;
    p2.category = "Environmental Science".to_string();
    p2.requirements = strings(&["Field work", "C"]);
    p2.skills = strings(&["Embedded C", "Data analysis"]);

    let mut p3 = project("p3");
    p3.title = "Consensus protocol testing".to_string();
    p3.mentor_id = "m3".to_string();
    p3.mentor_name = "Chen Jie".to_string();
    p3.keywords = strings(&["区块链", "分布式"]);
    p3.description = "Fuzzing Raft implementations".to_string();
    p3.status = ProjectStatus::Planning;
    p3.category = "Systems".to_string();
    p3.difficulty = Difficulty::Advanced;
    p3.estimated_duration = 14;
    p3.requirements = strings(&["Rust", "Go", "Networking", "Testing", "Linux", "Git", "Math"]);
    p3.skills = strings(&["Rust", "Go", "TLA+", "Docker", "Linux", "Git"]);

    let mut p4 = project("p4");
    p4.title = "Campus tutoring platform".to_string();
    p4.mentor_id = "m3".to_string();
    p4.mentor_name = "Chen Jie".to_string();
    p4.keywords = strings(&["教育", "Web"]);
    p4.description = "Match tutors with first-year students".to_string();
    p4.category = "Software Engineering".to_string();
    p4.difficulty = Difficulty::Beginner;
    p4.estimated_duration = 3;
    p4.requirements = strings(&["HTML"]);
    p4.skills = strings(&["TypeScript"]);

    let mut p5 = project("p5");
    p5.title = "Quantum circuit simulation".to_string();
    p5.keywords = strings(&["量子", "前沿"]);
    p5.description = "Tensor-network simulation of small circuits".to_string();
    p5.status = ProjectStatus::Cancelled;
    p5.category = "Physics".to_string();
    p5.difficulty = Difficulty::Advanced;
    p5.estimated_duration = 12;
    p5.requirements = strings(&["Quantum mechanics", "Python", "Linear algebra"]);
    p5.skills = strings(&["Python", "NumPy", "Qiskit"]);

    Dataset {
        version: "1.0.0".to_string(),
        last_updated: "2024-09-01".to_string(),
        mentors: vec![li, zhang, chen],
        projects: vec![p1, p2, p3, p4, p5],
        reviews: vec![],
        statistics: Default::default(),
        research_fields: strings(&["Machine Learning", "Computer Vision", "Water Treatment", "Distributed Systems"]),
        departments: strings(&["Computer Science", "Environmental Engineering"]),
        project_categories: strings(&["Artificial Intelligence", "Environmental Science", "Systems", "Software Engineering", "Physics"]),
        skills: vec![],
    }
}

/// `sample_dataset()` as the JSON document a dataset source would serve.
pub fn sample_dataset_json() -> String {
    serde_json::to_string(&sample_dataset()).expect("sample dataset serialises")
}
