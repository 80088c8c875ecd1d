use serde::{Deserialize, Serialize};

/// University course with weighted midterm/final grading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UniversityCourse {
    pub id: String,
    pub name: String,
    pub credits: u32,
    pub midterm_grade: f64,
    pub final_grade: f64,
    /// Percentage weights; midterm + final are expected to sum to 100.
    pub midterm_weight: f64,
    pub final_weight: f64,
}

/// Pre-university course graded as two term averages on a 100 scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreUniCourse {
    pub id: String,
    pub name: String,
    pub term1_grade: f64,
    pub term2_grade: f64,
}

/// Typed mutation for a university course entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum CoursePatch {
    Rename { name: String },
    SetCredits { credits: u32 },
    SetMidterm { grade: f64, weight: f64 },
    SetFinal { grade: f64, weight: f64 },
}

impl UniversityCourse {
    pub fn apply(&mut self, patch: CoursePatch) {
        match patch {
            CoursePatch::Rename { name } => self.name = name,
            CoursePatch::SetCredits { credits } => self.credits = credits,
            CoursePatch::SetMidterm { grade, weight } => {
                self.midterm_grade = grade;
                self.midterm_weight = weight;
            }
            CoursePatch::SetFinal { grade, weight } => {
                self.final_grade = grade;
                self.final_weight = weight;
            }
        }
    }

    /// Course average on the 100 scale from the weighted midterm/final.
    pub fn average(&self) -> f64 {
        (self.midterm_grade * self.midterm_weight + self.final_grade * self.final_weight) / 100.0
    }
}

/// Credit-weighted GPA on the 4.0 scale (100-scale average divided by 25).
pub fn university_gpa(courses: &[UniversityCourse]) -> f64 {
    let mut total_points = 0.0;
    let mut total_credits = 0u32;
    for course in courses {
        total_points += course.average() * course.credits as f64;
        total_credits += course.credits;
    }
    if total_credits == 0 {
        return 0.0;
    }
    (total_points / total_credits as f64) / 25.0
}

/// Mean of the per-course term averages on the 100 scale.
pub fn preuni_gpa(courses: &[PreUniCourse]) -> f64 {
    if courses.is_empty() {
        return 0.0;
    }
    let total: f64 = courses
        .iter()
        .map(|c| (c.term1_grade + c.term2_grade) / 2.0)
        .sum();
    total / courses.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(credits: u32, midterm: f64, final_grade: f64) -> UniversityCourse {
        UniversityCourse {
            id: "1".to_string(),
            name: "Matematik I".to_string(),
            credits,
            midterm_grade: midterm,
            final_grade,
            midterm_weight: 40.0,
            final_weight: 60.0,
        }
    }

    #[test]
    fn test_university_gpa_single_course() {
        // 85*0.4 + 90*0.6 = 88 -> 88/25 = 3.52
        let gpa = university_gpa(&[course(4, 85.0, 90.0)]);
        assert!((gpa - 3.52).abs() < 1e-9);
    }

    #[test]
    fn test_university_gpa_credit_weighting() {
        // (88*4 + 50*2) / 6 = 75.33.. -> 3.0133..
        let gpa = university_gpa(&[course(4, 85.0, 90.0), course(2, 50.0, 50.0)]);
        assert!((gpa - 75.33333333 / 25.0).abs() < 1e-6);
    }

    #[test]
    fn test_empty_course_lists() {
        assert_eq!(university_gpa(&[]), 0.0);
        assert_eq!(preuni_gpa(&[]), 0.0);
    }

    #[test]
    fn test_preuni_gpa() {
        let courses = vec![
            PreUniCourse {
                id: "1".to_string(),
                name: "Matematik".to_string(),
                term1_grade: 85.0,
                term2_grade: 90.0,
            },
            PreUniCourse {
                id: "2".to_string(),
                name: "Fizik".to_string(),
                term1_grade: 70.0,
                term2_grade: 80.0,
            },
        ];
        // (87.5 + 75) / 2 = 81.25
        assert!((preuni_gpa(&courses) - 81.25).abs() < 1e-9);
    }

    #[test]
    fn test_course_patch() {
        let mut c = course(4, 85.0, 90.0);
        c.apply(CoursePatch::Rename {
            name: "Fizik II".to_string(),
        });
        c.apply(CoursePatch::SetCredits { credits: 6 });
        assert_eq!(c.name, "Fizik II");
        assert_eq!(c.credits, 6);
    }
}
