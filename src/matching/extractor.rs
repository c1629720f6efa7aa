//! Heuristic segmentation of resume and job posting text into named sections
//!
//! Each field has an ordered table of header patterns tried in priority order;
//! the first pattern yielding a non-empty capture wins. The `regex` crate has
//! no lookahead, so section terminators are consuming non-capturing groups
//! rather than the usual `(?=...)` — equivalent for single extraction.

use regex::Regex;

/// How many leading lines to scan when falling back to a bare job-title line.
const POSITION_SCAN_LINES: usize = 15;

const RESUME_POSITION_PATTERNS: &[&str] = &[
    r"(?i)Желаемая\s+(?:позиция|должность).*?:?\s*\n?([^\n]+)",
    r"(?i)Целевая\s+(?:позиция|роль).*?:?\s*\n?([^\n]+)",
    r"(?i)Desired\s+(?:position|role|job).*?:?\s*\n?([^\n]+)",
    r"(?i)Objective\s*:?\s*\n?([^\n]+)",
];

const RESUME_ABOUT_PATTERNS: &[&str] = &[
    r"(?is)(?:Обо мне|Профиль).*?:(.*?)(?:Навыки|Опыт работы|$)",
    r"(?is)(?:Profile|Summary|About\s+me).*?:(.*?)(?:Skills|Experience|Education|$)",
];

const RESUME_SKILLS_PATTERNS: &[&str] = &[
    r"(?is)Навыки.*?:(.*?)(?:Опыт работы|Образование|$)",
    r"(?is)Skills.*?:(.*?)(?:Experience|Education|$)",
];

const RESUME_EXPERIENCE_PATTERNS: &[&str] = &[
    r"(?is)Опыт\s+работы.*?:(.*?)(?:Образование|Сертификаты|Навыки|$)",
    r"(?is)Work\s+Experience.*?:(.*?)(?:Education|Skills|Certificates|$)",
];

const RESUME_EDUCATION_PATTERNS: &[&str] = &[
    r"(?is)Образование.*?:(.*?)(?:Сертификаты|Навыки|$)",
    r"(?is)Education.*?:(.*?)(?:Certificates|Skills|Experience|$)",
];

const JOB_COMPANY_PATTERNS: &[&str] = &[
    r"(?is)Название компании.*?:\s*(.*?)(?:Название вакансии|Локация|Требования|$)",
    r"(?is)Company(?:\s+name)?\s*:\s*(.*?)(?:Job\s+title|Position|Location|Requirements|$)",
];

const JOB_TITLE_PATTERNS: &[&str] = &[
    r"(?is)Название вакансии:\s*(.*?)(?:Локация|Требования|$)",
    r"(?is)(?:Job\s+title|Vacancy|Position)\s*:\s*(.*?)(?:Location|Requirements|$)",
];

const JOB_LOCATION_PATTERNS: &[&str] = &[
    r"(?is)Локация:\s*(.*?)(?:Требования|Обязанности|$)",
    r"(?is)Location\s*:\s*(.*?)(?:Requirements|Responsibilities|$)",
];

const JOB_REQUIREMENTS_PATTERNS: &[&str] = &[
    r"(?is)Требования.*?:\s*(.*?)(?:Обязанности|$)",
    r"(?is)Requirements\s*:\s*(.*?)(?:Responsibilities|$)",
];

const JOB_RESPONSIBILITIES_PATTERNS: &[&str] = &[
    r"(?is)Обязанности.*?:\s*(.*?)$",
    r"(?is)Responsibilities\s*:\s*(.*?)$",
];

/// Degree-requirement clause searched inside the extracted requirements text.
const EDUCATION_CLAUSE_PATTERN: &str =
    r"(?i)(?:Высшее\s+образование|Higher\s+education|Bachelor'?s\s+degree)[^.\n]*";

const ADDITIONAL_INFO_PATTERN: &str = r"(?is)Дополнительная информация\s*:?\s*(.*)";

/// Lines matching this are contact details, never a job title.
const CONTACT_LINE_PATTERN: &str = r"(?i)тел|email|citizenship|гражданство|возраст";

/// Sections extracted from a resume. Every field is always present; an empty
/// string means the section was not found.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResumeSections {
    pub position: String,
    pub about: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
}

/// Sections extracted from a job posting. Same empty-string convention as
/// [`ResumeSections`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobSections {
    pub title: String,
    pub company: String,
    pub location: String,
    pub requirements: String,
    pub responsibilities: String,
    pub education: String,
}

pub struct SectionExtractor {
    resume_position: Vec<Regex>,
    resume_about: Vec<Regex>,
    resume_skills: Vec<Regex>,
    resume_experience: Vec<Regex>,
    resume_education: Vec<Regex>,
    job_company: Vec<Regex>,
    job_title: Vec<Regex>,
    job_location: Vec<Regex>,
    job_requirements: Vec<Regex>,
    job_responsibilities: Vec<Regex>,
    education_clause: Regex,
    additional_info: Regex,
    contact_line: Regex,
    whitespace: Regex,
}

impl Default for SectionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionExtractor {
    pub fn new() -> Self {
        Self {
            resume_position: compile(RESUME_POSITION_PATTERNS),
            resume_about: compile(RESUME_ABOUT_PATTERNS),
            resume_skills: compile(RESUME_SKILLS_PATTERNS),
            resume_experience: compile(RESUME_EXPERIENCE_PATTERNS),
            resume_education: compile(RESUME_EDUCATION_PATTERNS),
            job_company: compile(JOB_COMPANY_PATTERNS),
            job_title: compile(JOB_TITLE_PATTERNS),
            job_location: compile(JOB_LOCATION_PATTERNS),
            job_requirements: compile(JOB_REQUIREMENTS_PATTERNS),
            job_responsibilities: compile(JOB_RESPONSIBILITIES_PATTERNS),
            education_clause: Regex::new(EDUCATION_CLAUSE_PATTERN)
                .expect("Invalid education clause regex"),
            additional_info: Regex::new(ADDITIONAL_INFO_PATTERN)
                .expect("Invalid additional info regex"),
            contact_line: Regex::new(CONTACT_LINE_PATTERN).expect("Invalid contact line regex"),
            whitespace: Regex::new(r"\s+").expect("Invalid whitespace regex"),
        }
    }

    pub fn extract_resume_sections(&self, text: &str) -> ResumeSections {
        let text = text.trim();

        let mut position = self.first_match(&self.resume_position, text);
        let about = self.first_match(&self.resume_about, text);
        let mut skills = self.first_match(&self.resume_skills, text);
        let experience = self.first_match(&self.resume_experience, text);
        let education = self.first_match(&self.resume_education, text);

        if position.is_empty() {
            position = self.position_from_leading_lines(text);
        }

        if skills.is_empty() {
            if let Some(caps) = self.additional_info.captures(text) {
                skills = self.collapse(&caps[1]);
            }
        }

        // Skills and self-description overlap; with no explicit skills section,
        // the about text is the best remaining signal.
        if skills.is_empty() && !about.is_empty() {
            skills = about.clone();
        }

        ResumeSections {
            position,
            about,
            skills,
            experience,
            education,
        }
    }

    pub fn extract_job_sections(&self, text: &str) -> JobSections {
        let text = text.trim();

        let company = self.first_match(&self.job_company, text);
        let title = self.first_match(&self.job_title, text);
        let location = self.first_match(&self.job_location, text);
        let requirements = self.first_match(&self.job_requirements, text);
        let responsibilities = self.first_match(&self.job_responsibilities, text);

        // There is no top-level education header in job postings; the degree
        // requirement lives inside the requirements section.
        let education = self
            .education_clause
            .find(&requirements)
            .map(|m| m.as_str().trim().to_string())
            .unwrap_or_default();

        JobSections {
            title,
            company,
            location,
            requirements,
            responsibilities,
            education,
        }
    }

    /// First pattern whose last non-empty capture group survives whitespace
    /// collapsing wins.
    fn first_match(&self, patterns: &[Regex], text: &str) -> String {
        for pattern in patterns {
            if let Some(caps) = pattern.captures(text) {
                let groups: Vec<&str> = caps
                    .iter()
                    .skip(1)
                    .flatten()
                    .map(|m| m.as_str())
                    .collect();

                if let Some(raw) = groups.iter().rev().find(|g| !g.trim().is_empty()) {
                    let value = self.collapse(raw);
                    if !value.is_empty() {
                        return value;
                    }
                }
            }
        }
        String::new()
    }

    /// Fallback when no position header matched: the first short, capitalized
    /// line near the top that is not contact information.
    fn position_from_leading_lines(&self, text: &str) -> String {
        for line in text.lines().take(POSITION_SCAN_LINES) {
            let line = line.trim();
            if self.contact_line.is_match(line) {
                continue;
            }
            let words = line.split_whitespace().count();
            if (2..=6).contains(&words)
                && line.chars().next().is_some_and(|c| c.is_uppercase())
            {
                return line.to_string();
            }
        }
        String::new()
    }

    fn collapse(&self, raw: &str) -> String {
        self.whitespace.replace_all(raw.trim(), " ").trim().to_string()
    }
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("Invalid section pattern"))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_russian_resume_headers() {
        let extractor = SectionExtractor::new();
        let text = "Желаемая позиция: Backend Engineer\n\
                    Обо мне: Разработчик с опытом в высоконагруженных системах\n\
                    Навыки: Rust, PostgreSQL, Docker\n\
                    Опыт работы: 5 лет в финтехе\n\
                    Образование: МГУ, прикладная математика";

        let sections = extractor.extract_resume_sections(text);
        assert_eq!(sections.position, "Backend Engineer");
        assert_eq!(sections.skills, "Rust, PostgreSQL, Docker");
        assert_eq!(sections.experience, "5 лет в финтехе");
        assert_eq!(sections.education, "МГУ, прикладная математика");
        assert!(sections.about.contains("высоконагруженных"));
    }

    #[test]
    fn test_english_resume_headers() {
        let extractor = SectionExtractor::new();
        let text = "Objective: Senior Rust Developer\n\
                    Summary: Systems programmer focused on reliability\n\
                    Work Experience: Platform team lead at a fintech\n\
                    Skills: Rust, Tokio, Kubernetes\n\
                    Education: BSc Computer Science";

        let sections = extractor.extract_resume_sections(text);
        assert_eq!(sections.position, "Senior Rust Developer");
        assert_eq!(sections.skills, "Rust, Tokio, Kubernetes");
        assert_eq!(sections.experience, "Platform team lead at a fintech");
        assert_eq!(sections.education, "BSc Computer Science");
    }

    #[test]
    fn test_position_header_on_next_line() {
        let extractor = SectionExtractor::new();
        let text = "Желаемая должность:\nData Engineer\nНавыки: SQL";

        let sections = extractor.extract_resume_sections(text);
        assert_eq!(sections.position, "Data Engineer");
    }

    #[test]
    fn test_position_fallback_scans_leading_lines() {
        let extractor = SectionExtractor::new();
        let text = "Иванов Иван Иванович Петрович Сидорович Александрович Максимович\n\
                    тел: +7 900 123-45-67\n\
                    email: ivanov@example.com\n\
                    Senior Data Analyst\n\
                    Навыки: SQL, Python";

        let sections = extractor.extract_resume_sections(text);
        assert_eq!(sections.position, "Senior Data Analyst");
    }

    #[test]
    fn test_position_fallback_skips_contact_lines() {
        let extractor = SectionExtractor::new();
        let text = "Гражданство: Россия\nВозраст: 30 лет\nBackend Team Lead\n";

        let sections = extractor.extract_resume_sections(text);
        assert_eq!(sections.position, "Backend Team Lead");
    }

    #[test]
    fn test_skills_fall_back_to_additional_information() {
        let extractor = SectionExtractor::new();
        let text = "Желаемая позиция: QA Engineer\n\
                    Дополнительная информация: Selenium, автотесты, CI";

        let sections = extractor.extract_resume_sections(text);
        assert_eq!(sections.skills, "Selenium, автотесты, CI");
    }

    #[test]
    fn test_skills_fall_back_to_about() {
        let extractor = SectionExtractor::new();
        let text = "Желаемая позиция: QA Engineer\n\
                    Обо мне: Пишу автотесты на Python";

        let sections = extractor.extract_resume_sections(text);
        assert_eq!(sections.skills, sections.about);
        assert!(!sections.skills.is_empty());
    }

    #[test]
    fn test_unmatched_fields_are_empty() {
        let extractor = SectionExtractor::new();
        let sections = extractor.extract_resume_sections("just some unstructured text here");

        assert_eq!(sections.experience, "");
        assert_eq!(sections.education, "");
    }

    #[test]
    fn test_captured_whitespace_is_collapsed() {
        let extractor = SectionExtractor::new();
        let text = "Навыки:\n  Rust,\n  асинхронное\n\n  программирование\nОпыт работы: 3 года";

        let sections = extractor.extract_resume_sections(text);
        assert_eq!(sections.skills, "Rust, асинхронное программирование");
    }

    #[test]
    fn test_russian_job_posting() {
        let extractor = SectionExtractor::new();
        let text = "Название компании: ООО Рога и Копыта\n\
                    Название вакансии: Backend Engineer\n\
                    Локация: Москва\n\
                    Требования: Высшее образование, знание Rust и SQL.\n\
                    Обязанности: Разработка и поддержка API";

        let sections = extractor.extract_job_sections(text);
        assert_eq!(sections.company, "ООО Рога и Копыта");
        assert_eq!(sections.title, "Backend Engineer");
        assert_eq!(sections.location, "Москва");
        assert!(sections.requirements.contains("знание Rust"));
        assert_eq!(sections.responsibilities, "Разработка и поддержка API");
    }

    #[test]
    fn test_job_education_derived_from_requirements() {
        let extractor = SectionExtractor::new();
        let text = "Название вакансии: Аналитик\n\
                    Требования: Высшее образование, опыт от 3 лет. Знание SQL.\n\
                    Обязанности: Отчётность";

        let sections = extractor.extract_job_sections(text);
        assert_eq!(sections.education, "Высшее образование, опыт от 3 лет");
    }

    #[test]
    fn test_job_education_empty_without_degree_clause() {
        let extractor = SectionExtractor::new();
        let text = "Название вакансии: Курьер\nТребования: Наличие велосипеда";

        let sections = extractor.extract_job_sections(text);
        assert_eq!(sections.education, "");
    }

    #[test]
    fn test_english_job_posting() {
        let extractor = SectionExtractor::new();
        let text = "Company: Acme Corp\n\
                    Job title: Platform Engineer\n\
                    Location: Berlin\n\
                    Requirements: Bachelor's degree in CS, Rust experience.\n\
                    Responsibilities: Own the ingestion pipeline";

        let sections = extractor.extract_job_sections(text);
        assert_eq!(sections.title, "Platform Engineer");
        assert_eq!(sections.company, "Acme Corp");
        assert!(sections.education.starts_with("Bachelor's degree"));
        assert_eq!(sections.responsibilities, "Own the ingestion pipeline");
    }
}
