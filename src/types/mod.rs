pub mod id;
pub mod options;
pub mod response;
pub mod vacancy;

pub use id::{Identifier, VacancyId};
pub use options::{FilterCategory, FilterOption};
pub use vacancy::{
    EducationQualification, EducationRequirement, EnrichedVacancy, MajorEligibility, MajorType,
    QualificationMajors, Qualifications, Vacancy, VacancyDetail,
};
