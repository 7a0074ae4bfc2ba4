//! Test catalogue: every SSB test that can produce a result

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of test a submission belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestType {
    /// Officer Intelligence Rating (Phase 1)
    Oir,
    /// Picture Perception & Description Test (Phase 1)
    Ppdt,
    /// Thematic Apperception Test
    Tat,
    /// Word Association Test
    Wat,
    /// Situation Reaction Test
    Srt,
    /// Self Description
    Sd,
    /// GTO: Group Discussion
    GtoGd,
    /// GTO: Group Planning Exercise
    GtoGpe,
    /// GTO: Progressive Group Task
    GtoPgt,
    /// GTO: Half Group Task
    GtoHgt,
    /// GTO: Group Obstacle Race
    GtoGor,
    /// GTO: Individual Obstacles
    GtoIo,
    /// GTO: Command Task
    GtoCt,
    /// GTO: Lecturette
    GtoLecturette,
    /// Personal interview
    Interview,
}

impl TestType {
    /// GTO sub-test, if this is one
    pub fn gto(&self) -> Option<GtoTestType> {
        GtoTestType::ALL.iter().copied().find(|g| g.test_type() == *self)
    }

    /// Short label
    pub fn label(&self) -> &'static str {
        match self {
            TestType::Oir => "OIR",
            TestType::Ppdt => "PPDT",
            TestType::Tat => "TAT",
            TestType::Wat => "WAT",
            TestType::Srt => "SRT",
            TestType::Sd => "SD",
            TestType::GtoGd => "GTO-GD",
            TestType::GtoGpe => "GTO-GPE",
            TestType::GtoPgt => "GTO-PGT",
            TestType::GtoHgt => "GTO-HGT",
            TestType::GtoGor => "GTO-GOR",
            TestType::GtoIo => "GTO-IO",
            TestType::GtoCt => "GTO-CT",
            TestType::GtoLecturette => "GTO-LECTURETTE",
            TestType::Interview => "INTERVIEW",
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The 8 Group Testing Officer tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GtoTestType {
    /// Group Discussion
    GroupDiscussion,
    /// Group Planning Exercise
    GroupPlanningExercise,
    /// Progressive Group Task
    ProgressiveGroupTask,
    /// Half Group Task
    HalfGroupTask,
    /// Group Obstacle Race
    GroupObstacleRace,
    /// Individual Obstacles
    IndividualObstacles,
    /// Command Task
    CommandTask,
    /// Lecturette
    Lecturette,
}

impl GtoTestType {
    /// All GTO tasks in conduct order
    pub const ALL: [GtoTestType; 8] = [
        GtoTestType::GroupDiscussion,
        GtoTestType::GroupPlanningExercise,
        GtoTestType::ProgressiveGroupTask,
        GtoTestType::HalfGroupTask,
        GtoTestType::GroupObstacleRace,
        GtoTestType::IndividualObstacles,
        GtoTestType::CommandTask,
        GtoTestType::Lecturette,
    ];

    /// Corresponding [`TestType`]
    pub fn test_type(&self) -> TestType {
        match self {
            GtoTestType::GroupDiscussion => TestType::GtoGd,
            GtoTestType::GroupPlanningExercise => TestType::GtoGpe,
            GtoTestType::ProgressiveGroupTask => TestType::GtoPgt,
            GtoTestType::HalfGroupTask => TestType::GtoHgt,
            GtoTestType::GroupObstacleRace => TestType::GtoGor,
            GtoTestType::IndividualObstacles => TestType::GtoIo,
            GtoTestType::CommandTask => TestType::GtoCt,
            GtoTestType::Lecturette => TestType::GtoLecturette,
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            GtoTestType::GroupDiscussion => "Group Discussion",
            GtoTestType::GroupPlanningExercise => "Group Planning Exercise",
            GtoTestType::ProgressiveGroupTask => "Progressive Group Task",
            GtoTestType::HalfGroupTask => "Half Group Task",
            GtoTestType::GroupObstacleRace => "Group Obstacle Race",
            GtoTestType::IndividualObstacles => "Individual Obstacles",
            GtoTestType::CommandTask => "Command Task",
            GtoTestType::Lecturette => "Lecturette",
        }
    }
}

/// Phase 2 psychology tests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PsychTest {
    /// Thematic Apperception Test
    Tat,
    /// Word Association Test
    Wat,
    /// Situation Reaction Test
    Srt,
    /// Self Description
    Sd,
}

impl PsychTest {
    /// All psychology tests
    pub const ALL: [PsychTest; 4] = [PsychTest::Tat, PsychTest::Wat, PsychTest::Srt, PsychTest::Sd];

    /// Corresponding [`TestType`]
    pub fn test_type(&self) -> TestType {
        match self {
            PsychTest::Tat => TestType::Tat,
            PsychTest::Wat => TestType::Wat,
            PsychTest::Srt => TestType::Srt,
            PsychTest::Sd => TestType::Sd,
        }
    }
}
