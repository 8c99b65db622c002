//! Application constants for the result sheet processor
//!
//! This module contains field names, status values, file naming conventions
//! and scoring defaults used throughout the result sheet processor.

// =============================================================================
// Record Field Names
// =============================================================================

/// Field names read from and written to result sheet records
pub mod fields {
    // Input fields
    pub const STATUS: &str = "status";
    pub const ACADEMIC_YEAR: &str = "academicYear";
    pub const CLASS_ROLL: &str = "classRoll";
    pub const STUDENT_NAME: &str = "studentName";
    pub const TOTAL_WITH_ADDITIONAL: &str = "totalWithAdditional";
    pub const GPA_WITH_ADDITIONAL: &str = "gpaWithAdditional";
    pub const GPA_WITHOUT_ADDITIONAL: &str = "gpaWithoutAdditional";

    // Derived fields
    pub const SUBJECT_COUNT: &str = "subjectCount";
    pub const AVG_NUMBER: &str = "avgNumber";
    pub const AVG_NUMBER_PER_CENT: &str = "avgNumberPerCent";
    pub const GROUP: &str = "group3";
    pub const SECTION: &str = "Section";
    pub const BATCH: &str = "Batch";
    pub const ROLL: &str = "roll";
    pub const NAME: &str = "name";
    pub const GPA: &str = "gpa";
    pub const TOTAL_MARK: &str = "totalMark";
    pub const AVG_MARK_PERCENT: &str = "avgMark(%)";
    pub const RANKING: &str = "Ranking";
}

/// Keys of a per-subject score block
pub mod score_keys {
    pub const CQ: &str = "cq";
    pub const MCQ: &str = "mcq";
    pub const PRACTICAL: &str = "practical";
    pub const TERM_TOTAL: &str = "termTotal";
    pub const GRADE: &str = "grade";
    pub const GP: &str = "gp";

    /// All keys a complete score block carries
    pub const ALL: &[&str] = &[CQ, MCQ, PRACTICAL, TERM_TOTAL, GRADE, GP];
}

// =============================================================================
// Status Values
// =============================================================================

/// Record status values
pub mod status {
    /// Student passed and takes part in ranking
    pub const QUALIFIED: &str = "qualified";

    /// Qualified student whose total marks are zero
    pub const ABSENT: &str = "absent";

    /// Status text used when a record carries no status at all
    pub const MISSING: &str = "None";
}

/// Marker for an absent or exempted creative-question component
pub const CQ_ABSENT_MARKER: &str = "A";

// =============================================================================
// Roll Number Layout
// =============================================================================

/// Character index of the group digit inside a class roll
pub const GROUP_DIGIT_INDEX: usize = 8;

/// Character range of the batch segment inside a class roll
pub const BATCH_SEGMENT_START: usize = 5;
pub const BATCH_SEGMENT_LEN: usize = 2;

/// Number of trailing class roll characters forming the short roll
pub const SHORT_ROLL_LEN: usize = 3;

// =============================================================================
// Scoring Defaults
// =============================================================================

/// Full marks of a single subject, used to turn the average into a percentage
pub const DEFAULT_PER_SUBJECT_FULL_MARKS: f64 = 20.0;

/// Width of a section roll band
pub const DEFAULT_SECTION_BAND_WIDTH: i64 = 150;

/// Number of section bands (A through F)
pub const DEFAULT_SECTION_COUNT: usize = 6;

/// Decimal places kept on derived averages
pub const AVERAGE_DECIMAL_PLACES: usize = 2;

// =============================================================================
// File and Workflow Conventions
// =============================================================================

/// Tag identifying a scraped result sheet in arguments and the workflow log
pub const INPUT_TAG: &str = "_resultSheetJson_";

/// Tag written to the workflow log for every cleaned result sheet
pub const OUTPUT_TAG: &str = "_cleanResultSheet_";

/// Separator between a tagged entry's label and its path
pub const TAG_PATH_SEPARATOR: &str = "_:";

/// Prefix of produced result files
pub const OUTPUT_FILE_PREFIX: &str = "cleaned_";

/// Timestamp format used in output file names and workflow entries
pub const RUN_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Default output directory for cleaned result sheets
pub const DEFAULT_OUTPUT_DIR: &str = "./assets/resultScraping/cleanedResultSheet";

/// Default workflow log shared by the scraping pipeline stages
pub const DEFAULT_WORKFLOW_LOG: &str = "./scripts/collegePdf/resultScraping/workflowResultSheet.txt";

/// Default per-run transform log
pub const DEFAULT_LOG_FILE: &str = "transform.log";

/// Build the output filename for a run timestamp
pub fn output_filename(timestamp: &str) -> String {
    format!("{}{}.json", OUTPUT_FILE_PREFIX, timestamp)
}

/// Build the workflow log label for a run timestamp
pub fn output_tag_label(timestamp: &str) -> String {
    format!("{}{}{}", OUTPUT_TAG, timestamp, TAG_PATH_SEPARATOR)
}
