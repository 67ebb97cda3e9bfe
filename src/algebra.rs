//! Set algebra over node identity.
//!
//! All operations are pure: they return a new set and leave both operands
//! untouched. Strings passed as the other operand are selectors over the
//! whole document.

use crate::error::Result;
use crate::node_set::NodeSet;
use crate::resolver::IntoTarget;

impl<'a> NodeSet<'a> {
    /// Members of this set followed by new members of `other`.
    pub fn add<T: IntoTarget<'a>>(&self, other: T) -> Result<NodeSet<'a>> {
        let other = self.target_resolve(other)?;
        Ok(self.derive(self.ids().iter().chain(other.ids()).copied()))
    }

    /// Members that are also in `other`, in this set's order.
    pub fn intersect<T: IntoTarget<'a>>(&self, other: T) -> Result<NodeSet<'a>> {
        let other = self.target_resolve(other)?;
        Ok(self.derive(self.ids().iter().copied().filter(|id| other.contains(id))))
    }

    /// Members that are not in `other`, in this set's order.
    pub fn not<T: IntoTarget<'a>>(&self, other: T) -> Result<NodeSet<'a>> {
        let other = self.target_resolve(other)?;
        Ok(self.derive(self.ids().iter().copied().filter(|id| !other.contains(id))))
    }

    /// Whether any member is in `other`. Always false for an empty set.
    pub fn is<T: IntoTarget<'a>>(&self, other: T) -> Result<bool> {
        if self.is_empty() {
            return Ok(false);
        }
        Ok(!self.intersect(other)?.is_empty())
    }
}
