//! VOI (Value-Of-Interest) window descriptions (§3).

/// The shaping function a VOI window applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VoiFunction {
	/// `((in - (center - 0.5)) / (width - 1) + 0.5) * span`, with a hard
	/// threshold when `width <= 1`.
	Linear,
	/// `((in - center) / width) * span`, no hard threshold.
	LinearExact,
	/// `span / (1 + exp(-4 * (in - center) / width))`.
	Sigmoid,
}

/// A single window description: center, width, shaping function, and a
/// human-readable label.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiDescription {
	/// Window center.
	pub center: f64,
	/// Window width.
	pub width: f64,
	/// Shaping function.
	pub function: VoiFunction,
	/// Human-readable description.
	pub description: String,
}

impl VoiDescription {
	/// Creates a VOI description with an empty label.
	pub fn new(center: f64, width: f64, function: VoiFunction) -> Self {
		Self { center, width, function, description: String::new() }
	}
}

/// An ordered sequence of [`VoiDescription`]s, preserving DICOM insertion
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VoiList(Vec<VoiDescription>);

impl VoiList {
	/// An empty list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Appends a VOI description, preserving order.
	pub fn push(&mut self, voi: VoiDescription) {
		self.0.push(voi);
	}

	/// Number of VOI descriptions in the list.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// True when the list has no entries.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Iterates the list in insertion order.
	pub fn iter(&self) -> impl Iterator<Item = &VoiDescription> {
		self.0.iter()
	}
}

impl FromIterator<VoiDescription> for VoiList {
	fn from_iter<T: IntoIterator<Item = VoiDescription>>(iter: T) -> Self {
		Self(iter.into_iter().collect())
	}
}
