//! Core domain models for live attendance.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use super::{
    error::{SessionError, ValueObjectError},
    value_object::{ClassId, SessionId, Timestamp, UserId},
};

/// Role bound to an identity at authentication time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Teacher,
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Teacher => "teacher",
            Role::Student => "student",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ValueObjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "teacher" => Ok(Role::Teacher),
            "student" => Ok(Role::Student),
            other => Err(ValueObjectError::UnknownRole(other.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verified identity of a request or socket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }
}

/// Attendance status of one student
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Absent => "absent",
        }
    }
}

/// Present / absent / total counts over an attendance map
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    pub present: usize,
    pub absent: usize,
    pub total: usize,
}

impl AttendanceSummary {
    pub fn from_statuses<'a>(statuses: impl IntoIterator<Item = &'a AttendanceStatus>) -> Self {
        let mut summary = Self::default();
        for status in statuses {
            match status {
                AttendanceStatus::Present => summary.present += 1,
                AttendanceStatus::Absent => summary.absent += 1,
            }
        }
        summary.total = summary.present + summary.absent;
        summary
    }
}

/// Lifecycle state of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionState {
    Active,
    Closed,
}

/// One live roll-call for a class
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub class_id: ClassId,
    /// Set at creation, never modified
    pub started_at: Timestamp,
    attendance: BTreeMap<UserId, AttendanceStatus>,
    state: SessionState,
}

impl Session {
    /// Create a new ACTIVE session with an empty attendance map
    pub fn new(id: SessionId, class_id: ClassId, started_at: Timestamp) -> Self {
        Self {
            id,
            class_id,
            started_at,
            attendance: BTreeMap::new(),
            state: SessionState::Active,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == SessionState::Active
    }

    pub fn attendance(&self) -> &BTreeMap<UserId, AttendanceStatus> {
        &self.attendance
    }

    /// Record a student's status; a later mark for the same student overwrites it
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` once the session has been finalized
    pub fn mark(&mut self, student_id: UserId, status: AttendanceStatus) -> Result<(), SessionError> {
        if !self.is_active() {
            return Err(SessionError::Closed);
        }
        self.attendance.insert(student_id, status);
        Ok(())
    }

    pub fn status_of(&self, student_id: &UserId) -> Option<AttendanceStatus> {
        self.attendance.get(student_id).copied()
    }

    /// Counts over the marks recorded so far
    pub fn summary(&self) -> AttendanceSummary {
        AttendanceSummary::from_statuses(self.attendance.values())
    }

    /// Close the session against the class roster
    ///
    /// The final map holds exactly one entry per roster member: the recorded
    /// status, or `Absent` if never marked. Marks for ids outside the roster are
    /// dropped and reported in `FinalizedSession::unenrolled`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Closed` if already closed
    pub fn close(&mut self, roster: &BTreeSet<UserId>) -> Result<FinalizedSession, SessionError> {
        if !self.is_active() {
            return Err(SessionError::Closed);
        }

        let attendance: BTreeMap<UserId, AttendanceStatus> = roster
            .iter()
            .map(|student_id| {
                let status = self
                    .attendance
                    .get(student_id)
                    .copied()
                    .unwrap_or(AttendanceStatus::Absent);
                (student_id.clone(), status)
            })
            .collect();

        let unenrolled = self
            .attendance
            .keys()
            .filter(|id| !roster.contains(*id))
            .cloned()
            .collect();

        self.attendance = attendance.clone();
        self.state = SessionState::Closed;

        Ok(FinalizedSession {
            session_id: self.id.clone(),
            class_id: self.class_id.clone(),
            started_at: self.started_at,
            summary: AttendanceSummary::from_statuses(attendance.values()),
            attendance,
            unenrolled,
        })
    }
}

/// Result of closing a session, ready for persistence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedSession {
    pub session_id: SessionId,
    pub class_id: ClassId,
    pub started_at: Timestamp,
    pub attendance: BTreeMap<UserId, AttendanceStatus>,
    pub summary: AttendanceSummary,
    /// Ids that were marked but are not enrolled in the class
    pub unenrolled: Vec<UserId>,
}

/// Class as seen through the data-access collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: ClassId,
    pub class_name: String,
    pub teacher_id: UserId,
    #[serde(default)]
    pub student_ids: BTreeSet<UserId>,
}

impl Class {
    pub fn is_taught_by(&self, user_id: &UserId) -> bool {
        &self.teacher_id == user_id
    }
}

/// Persisted attendance row, one per student per session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub class_id: ClassId,
    pub student_id: UserId,
    pub status: AttendanceStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::factory::SessionIdFactory;

    fn uid(id: &str) -> UserId {
        UserId::new(id.to_string()).unwrap()
    }

    fn new_session() -> Session {
        Session::new(
            SessionIdFactory::generate().unwrap(),
            ClassId::new("class-c".to_string()).unwrap(),
            Timestamp::new(1000),
        )
    }

    fn roster(ids: &[&str]) -> BTreeSet<UserId> {
        ids.iter().map(|id| uid(id)).collect()
    }

    #[test]
    fn test_session_new_is_active_and_empty() {
        // テスト項目: 新しい Session は ACTIVE で出欠が空
        // when (操作):
        let session = new_session();

        // then (期待する結果):
        assert_eq!(session.state(), SessionState::Active);
        assert!(session.attendance().is_empty());
        assert_eq!(session.started_at, Timestamp::new(1000));
    }

    #[test]
    fn test_mark_last_write_wins() {
        // テスト項目: 同じ学生への複数回のマークは最後の値が残る
        // given (前提条件):
        let mut session = new_session();

        // when (操作):
        session.mark(uid("a"), AttendanceStatus::Present).unwrap();
        session.mark(uid("a"), AttendanceStatus::Absent).unwrap();
        session.mark(uid("a"), AttendanceStatus::Present).unwrap();

        // then (期待する結果):
        assert_eq!(session.status_of(&uid("a")), Some(AttendanceStatus::Present));
        assert_eq!(session.attendance().len(), 1);
    }

    #[test]
    fn test_summary_counts_current_marks() {
        // テスト項目: 途中集計は現在のマークのみを数える
        // given (前提条件):
        let mut session = new_session();
        session.mark(uid("a"), AttendanceStatus::Present).unwrap();
        session.mark(uid("b"), AttendanceStatus::Absent).unwrap();
        session.mark(uid("d"), AttendanceStatus::Present).unwrap();

        // when (操作):
        let summary = session.summary();

        // then (期待する結果):
        assert_eq!(
            summary,
            AttendanceSummary {
                present: 2,
                absent: 1,
                total: 3
            }
        );
    }

    #[test]
    fn test_close_defaults_unmarked_to_absent() {
        // テスト項目: 未マークの学生は absent として確定される
        // given (前提条件):
        let mut session = new_session();
        session.mark(uid("a"), AttendanceStatus::Present).unwrap();

        // when (操作):
        let finalized = session.close(&roster(&["a", "b", "d"])).unwrap();

        // then (期待する結果):
        assert_eq!(finalized.attendance.len(), 3);
        assert_eq!(finalized.attendance[&uid("a")], AttendanceStatus::Present);
        assert_eq!(finalized.attendance[&uid("b")], AttendanceStatus::Absent);
        assert_eq!(finalized.attendance[&uid("d")], AttendanceStatus::Absent);
        assert_eq!(
            finalized.summary,
            AttendanceSummary {
                present: 1,
                absent: 2,
                total: 3
            }
        );
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn test_close_drops_unenrolled_marks() {
        // テスト項目: 名簿にない学生のマークは確定結果から除外される
        // given (前提条件):
        let mut session = new_session();
        session.mark(uid("a"), AttendanceStatus::Present).unwrap();
        session.mark(uid("stranger"), AttendanceStatus::Present).unwrap();

        // when (操作):
        let finalized = session.close(&roster(&["a", "b"])).unwrap();

        // then (期待する結果):
        assert_eq!(finalized.attendance.len(), 2);
        assert!(!finalized.attendance.contains_key(&uid("stranger")));
        assert_eq!(finalized.unenrolled, vec![uid("stranger")]);
        assert_eq!(finalized.summary.total, 2);
    }

    #[test]
    fn test_closed_session_rejects_mutation() {
        // テスト項目: CLOSED になった Session はマークも再確定も受け付けない
        // given (前提条件):
        let mut session = new_session();
        session.close(&roster(&["a"])).unwrap();

        // when (操作):
        let mark_result = session.mark(uid("a"), AttendanceStatus::Present);
        let close_result = session.close(&roster(&["a"]));

        // then (期待する結果):
        assert_eq!(mark_result, Err(SessionError::Closed));
        assert_eq!(close_result.unwrap_err(), SessionError::Closed);
    }

    #[test]
    fn test_close_with_empty_roster() {
        // テスト項目: 名簿が空なら確定結果も空
        // given (前提条件):
        let mut session = new_session();

        // when (操作):
        let finalized = session.close(&BTreeSet::new()).unwrap();

        // then (期待する結果):
        assert!(finalized.attendance.is_empty());
        assert_eq!(finalized.summary, AttendanceSummary::default());
    }

    #[test]
    fn test_role_parse() {
        // テスト項目: ロール文字列のパース
        // then (期待する結果):
        assert_eq!(Role::try_from("teacher"), Ok(Role::Teacher));
        assert_eq!(Role::try_from("student"), Ok(Role::Student));
        assert_eq!(
            Role::try_from("admin"),
            Err(ValueObjectError::UnknownRole("admin".to_string()))
        );
    }

    #[test]
    fn test_class_deserialize_from_seed_shape() {
        // テスト項目: シードファイル形式の JSON から Class を復元できる
        // given (前提条件):
        let json = r#"{"id":"c1","className":"Math","teacherId":"t1","studentIds":["s1","s2"]}"#;

        // when (操作):
        let class: Class = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert!(class.is_taught_by(&uid("t1")));
        assert!(class.student_ids.contains(&uid("s2")));
        assert_eq!(class.student_ids.len(), 2);
    }
}
