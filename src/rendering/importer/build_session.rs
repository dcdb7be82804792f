use log::info;

/// State that lives for exactly one top-level build. Create a new one per build instead of sharing it,
/// so repeated builds behave the same.
#[derive(Debug, Default)]
pub struct BuildSession {
    collider_advisory_emitted: bool,
    colliders_created: usize,
}

impl BuildSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn note_collider_created(&mut self) {
        self.colliders_created += 1;

        if !self.collider_advisory_emitted {
            self.collider_advisory_emitted = true;
            info!(
                "Colliders are created per brush and named after their entity, so several colliders sharing a name is expected."
            );
        }
    }

    pub fn collider_advisory_emitted(&self) -> bool {
        self.collider_advisory_emitted
    }

    pub fn colliders_created(&self) -> usize {
        self.colliders_created
    }
}
