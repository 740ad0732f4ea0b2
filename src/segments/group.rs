use super::{SegmentArena, SegmentId, StaffLabel};

/// All segments sharing one staff label, with derived page geometry.
#[derive(Clone, Debug)]
pub struct StaffGroup {
    pub staff: u32,
    pub row_start: i32,
    pub row_end: i32,
    pub col_start: i32,
    pub col_end: i32,
    pub min_line: i32,
    pub max_line: i32,
    pub members: Vec<SegmentId>,
}

impl StaffGroup {
    pub fn new(staff: u32, members: Vec<SegmentId>, arena: &SegmentArena) -> Self {
        let mut group = Self {
            staff,
            row_start: 0,
            row_end: 0,
            col_start: 0,
            col_end: 0,
            min_line: 0,
            max_line: 0,
            members,
        };
        group.update(arena);
        group
    }

    pub fn width(&self) -> i32 {
        self.col_end - self.col_start + 1
    }

    /// Number of distinct line offsets spanned, holes included.
    pub fn line_span(&self) -> i32 {
        self.max_line - self.min_line + 1
    }

    /// Recomputes the bounding box and line range from the members.
    /// An empty group keeps its previous geometry.
    pub fn update(&mut self, arena: &SegmentArena) {
        let mut first = true;
        for &id in &self.members {
            let seg = arena.get(id);
            let top = seg.row_start().min(seg.row_end());
            let bottom = seg.row_start().max(seg.row_end());
            let Some(StaffLabel { line, .. }) = seg.label else {
                continue;
            };
            if first {
                self.row_start = top;
                self.row_end = bottom;
                self.col_start = seg.col_start();
                self.col_end = seg.col_end();
                self.min_line = line;
                self.max_line = line;
                first = false;
            } else {
                self.row_start = self.row_start.min(top);
                self.row_end = self.row_end.max(bottom);
                self.col_start = self.col_start.min(seg.col_start());
                self.col_end = self.col_end.max(seg.col_end());
                self.min_line = self.min_line.min(line);
                self.max_line = self.max_line.max(line);
            }
        }
    }

    /// Member ids on one line, sorted by column start (ties by id).
    pub fn members_on_line(&self, arena: &SegmentArena, line: i32) -> Vec<SegmentId> {
        let mut on_line: Vec<SegmentId> = self
            .members
            .iter()
            .copied()
            .filter(|&id| arena[id].label.map(|l| l.line) == Some(line))
            .collect();
        on_line.sort_by_key(|&id| (arena[id].col_start(), id));
        on_line
    }

    /// Total column length of one line across all of its segments.
    pub fn line_length(&self, arena: &SegmentArena, line: i32) -> i32 {
        self.members_on_line(arena, line)
            .iter()
            .map(|&id| arena[id].width())
            .sum()
    }

    /// Unlinks and retires every segment of one line; returns how many
    /// segments were removed.
    pub fn remove_line(&mut self, arena: &mut SegmentArena, line: i32) -> usize {
        let doomed = self.members_on_line(arena, line);
        for &id in &doomed {
            arena.unlink_all(id);
            arena.retire(id);
        }
        self.members.retain(|id| !doomed.contains(id));
        self.update(arena);
        doomed.len()
    }

    /// Takes over the members of `other`, aligning their line offsets so
    /// both groups' top lines coincide.
    pub fn join(&mut self, arena: &mut SegmentArena, other: &StaffGroup) {
        let line_ofs = self.min_line - other.min_line;
        for &id in &other.members {
            if let Some(label) = arena.get_mut(id).label.as_mut() {
                label.staff = self.staff;
                label.line += line_ofs;
            }
            self.members.push(id);
        }
        self.update(arena);
    }

    /// Unlinks and retires every member; used when the whole group is
    /// discarded.
    pub fn retire_members(&self, arena: &mut SegmentArena) {
        for &id in &self.members {
            arena.unlink_all(id);
            arena.retire(id);
        }
    }
}
