//! Canned responses served to the reserved demo identity.
//!
//! Built once at startup and shared read-only; nothing here reaches the portal.

use serde_json::{json, Value};

use crate::models::course::{
    CourseDetail, CourseListing, CourseRecord, CourseSearch, RegisteredCourse, Registration,
    TermFilter,
};

#[derive(Debug, Clone)]
pub struct DemoDataset {
    transcript: Vec<CourseRecord>,
    catalogue: Vec<CourseDetail>,
    registered: Vec<RegisteredCourse>,
}

impl Default for DemoDataset {
    fn default() -> Self {
        Self::new()
    }
}

impl DemoDataset {
    pub fn new() -> Self {
        Self {
            transcript: demo_transcript(),
            catalogue: demo_catalogue(),
            registered: demo_registered(),
        }
    }

    pub fn transcript(&self) -> Vec<CourseRecord> {
        self.transcript.clone()
    }

    /// Catalogue entries in the searched department, narrowed by course-number prefix.
    pub fn courses(&self, search: &CourseSearch) -> Vec<CourseListing> {
        self.catalogue
            .iter()
            .map(|detail| &detail.listing)
            .filter(|listing| listing.department == search.dep)
            .filter(|listing| match &search.number {
                Some(number) => listing.course_number.starts_with(number.as_str()),
                None => true,
            })
            .cloned()
            .collect()
    }

    pub fn add_result(&self, registration: &Registration) -> Value {
        registration_result("added", registration)
    }

    pub fn drop_result(&self, registration: &Registration) -> Value {
        registration_result("dropped", registration)
    }

    /// Registered courses, narrowed to the requested CRNs when any are given.
    pub fn registered(&self, filter: &TermFilter) -> Vec<RegisteredCourse> {
        self.registered
            .iter()
            .filter(|course| filter.crn.is_empty() || filter.crn.contains(&course.listing.crn))
            .cloned()
            .collect()
    }

    pub fn view(&self, crn: &str) -> Option<CourseDetail> {
        self.catalogue
            .iter()
            .find(|detail| detail.listing.crn == crn)
            .cloned()
    }
}

fn registration_result(action: &str, registration: &Registration) -> Value {
    json!({
        "demo": true,
        "action": action,
        "season": registration.season,
        "year": registration.year,
        "crn": registration.crn,
        "message": format!("Demo mode: {} {} course(s)", action, registration.crn.len()),
    })
}

#[allow(clippy::too_many_arguments)]
fn record(
    department: &str,
    course_number: &str,
    title: &str,
    credit: &str,
    grade: Option<&str>,
    class_average: Option<&str>,
    term: &str,
    year: &str,
    completion_flag: Option<&str>,
) -> CourseRecord {
    CourseRecord {
        department: department.to_string(),
        course_number: course_number.to_string(),
        section: "001".to_string(),
        credit: Some(credit.to_string()),
        grade: grade.map(str::to_string),
        class_average: class_average.map(str::to_string),
        term: term.to_string(),
        year: year.to_string(),
        title: title.to_string(),
        completion_flag: completion_flag.map(str::to_string),
    }
}

fn demo_transcript() -> Vec<CourseRecord> {
    vec![
        record(
            "COMP",
            "202",
            "Foundations of Programming",
            "3",
            Some("A"),
            Some("B+"),
            "Fall",
            "2023",
            None,
        ),
        record("MATH", "140", "Calculus 1", "3", Some("A-"), Some("B"), "Fall", "2023", None),
        record(
            "MATH",
            "133",
            "Linear Algebra and Geometry",
            "3",
            Some("B+"),
            Some("B"),
            "Fall",
            "2023",
            None,
        ),
        record(
            "COMP",
            "250",
            "Intro to Computer Science",
            "3",
            Some("A"),
            Some("B+"),
            "Winter",
            "2024",
            None,
        ),
        record("MATH", "141", "Calculus 2", "4", Some("B"), Some("B-"), "Winter", "2024", None),
        record(
            "PHYS",
            "131",
            "Mechanics and Waves",
            "4",
            Some("B+"),
            Some("B"),
            "Winter",
            "2024",
            None,
        ),
        record(
            "COMP",
            "206",
            "Intro to Software Systems",
            "3",
            None,
            None,
            "Fall",
            "2024",
            Some("RW"),
        ),
        record("MATH", "240", "Discrete Structures", "3", None, None, "Fall", "2024", Some("RW")),
    ]
}

#[allow(clippy::too_many_arguments)]
fn listing(
    crn: &str,
    department: &str,
    course_number: &str,
    kind: &str,
    instructor: &str,
    meetings: &[(&str, &str)],
    is_full: bool,
    title: &str,
) -> CourseListing {
    CourseListing {
        crn: crn.to_string(),
        department: department.to_string(),
        course_number: course_number.to_string(),
        kind: kind.to_string(),
        instructor: instructor.to_string(),
        days: meetings.iter().map(|(day, _)| day.to_string()).collect(),
        time: meetings.iter().map(|(_, time)| time.to_string()).collect(),
        is_full,
        section: "001".to_string(),
        title: Some(title.to_string()),
    }
}

fn demo_catalogue() -> Vec<CourseDetail> {
    let detail = |listing: CourseListing, description: &str, capacity: u32, enrolled: u32| {
        CourseDetail {
            listing,
            description: Some(description.to_string()),
            credits: Some("3".to_string()),
            capacity: Some(capacity),
            enrolled: Some(enrolled),
            waitlist: Some(if enrolled >= capacity { 12 } else { 0 }),
        }
    };

    vec![
        detail(
            listing(
                "1001",
                "COMP",
                "206",
                "Lecture",
                "A. Tremblay",
                &[("Monday", "10:05-11:25"), ("Wednesday", "10:05-11:25")],
                false,
                "Intro to Software Systems",
            ),
            "Unix tools, shell scripting, C programming and version control.",
            400,
            362,
        ),
        detail(
            listing(
                "1002",
                "COMP",
                "251",
                "Lecture",
                "M. Gagnon",
                &[("Tuesday", "13:05-14:25"), ("Thursday", "13:05-14:25")],
                true,
                "Algorithms and Data Structures",
            ),
            "Design and analysis of algorithms: graphs, greedy methods, dynamic programming.",
            600,
            600,
        ),
        detail(
            listing(
                "1003",
                "COMP",
                "273",
                "Lecture",
                "L. Roy",
                &[("Monday", "14:35-15:55"), ("Wednesday", "14:35-15:55")],
                false,
                "Intro to Computer Systems",
            ),
            "Number representations, assembly language, memory hierarchy and pipelines.",
            350,
            280,
        ),
        detail(
            listing(
                "2001",
                "MATH",
                "240",
                "Lecture",
                "S. Cote",
                &[("Tuesday", "10:05-11:25"), ("Thursday", "10:05-11:25")],
                false,
                "Discrete Structures",
            ),
            "Logic, set theory, combinatorics, graph theory and number theory.",
            300,
            244,
        ),
        detail(
            listing(
                "2002",
                "MATH",
                "323",
                "Lecture",
                "J. Bouchard",
                &[("Friday", "08:35-09:55")],
                false,
                "Probability",
            ),
            "Sample spaces, random variables, expectation and limit theorems.",
            250,
            190,
        ),
    ]
}

fn demo_registered() -> Vec<RegisteredCourse> {
    let registered = |listing: CourseListing, location: &str, credits: &str| RegisteredCourse {
        listing,
        location: location.to_string(),
        credits: credits.to_string(),
        status: "Web Registered".to_string(),
    };

    vec![
        registered(
            listing(
                "1001",
                "COMP",
                "206",
                "Lecture",
                "A. Tremblay",
                &[("Monday", "10:05-11:25"), ("Wednesday", "10:05-11:25")],
                false,
                "Intro to Software Systems",
            ),
            "LEA 132",
            "3",
        ),
        registered(
            listing(
                "2001",
                "MATH",
                "240",
                "Lecture",
                "S. Cote",
                &[("Tuesday", "10:05-11:25"), ("Thursday", "10:05-11:25")],
                false,
                "Discrete Structures",
            ),
            "BURN 1B45",
            "3",
        ),
        registered(
            listing(
                "3001",
                "COMP",
                "396",
                "Project",
                "Staff",
                &[],
                false,
                "Undergraduate Research Project",
            ),
            "TBA",
            "3",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::course::Season, services::gpa};

    fn search(dep: &str, number: Option<&str>) -> CourseSearch {
        CourseSearch {
            dep: dep.to_string(),
            number: number.map(str::to_string),
            season: Season::Fall,
            year: "2024".to_string(),
        }
    }

    #[test]
    fn transcript_has_registered_rows_that_gpa_skips() {
        let dataset = DemoDataset::new();
        let transcript = dataset.transcript();
        assert!(transcript
            .iter()
            .any(|c| c.completion_flag.as_deref() == Some("RW")));
        let summary = gpa::aggregate(&transcript);
        assert_eq!(summary.total_credits, 20.0);
        assert_ne!(summary.cum_gpa, "N/A");
    }

    #[test]
    fn courses_filter_by_department_and_number_prefix() {
        let dataset = DemoDataset::new();
        assert_eq!(dataset.courses(&search("COMP", None)).len(), 3);
        let narrowed = dataset.courses(&search("COMP", Some("25")));
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].crn, "1002");
        assert!(dataset.courses(&search("HIST", None)).is_empty());
    }

    #[test]
    fn listing_days_and_times_stay_aligned() {
        let dataset = DemoDataset::new();
        for course in dataset.courses(&search("MATH", None)) {
            assert_eq!(course.days.len(), course.time.len());
        }
    }

    #[test]
    fn registered_filters_by_crn() {
        let dataset = DemoDataset::new();
        let all = TermFilter {
            season: Season::Fall,
            year: "2024".into(),
            crn: Vec::new(),
        };
        assert_eq!(dataset.registered(&all).len(), 3);
        let one = TermFilter {
            crn: vec!["2001".into()],
            ..all
        };
        assert_eq!(dataset.registered(&one).len(), 1);
    }

    #[test]
    fn view_finds_catalogue_entry() {
        let dataset = DemoDataset::new();
        let detail = dataset.view("1002").expect("demo course");
        assert!(detail.listing.is_full);
        assert_eq!(detail.waitlist, Some(12));
        assert!(dataset.view("9999").is_none());
    }

    #[test]
    fn registration_results_echo_request() {
        let dataset = DemoDataset::new();
        let registration = Registration {
            season: Season::Winter,
            year: "2025".into(),
            crn: vec!["1001".into(), "2001".into()],
        };
        let result = dataset.add_result(&registration);
        assert_eq!(result["action"], "added");
        assert_eq!(result["season"], "w");
        assert_eq!(result["crn"][1], "2001");
        assert_eq!(dataset.drop_result(&registration)["action"], "dropped");
    }
}
