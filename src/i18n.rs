//! Locale selection and the handful of strings the dashboard renders.

/// Display language of the portal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Locale {
	#[default]
	En,
	Hi,
}

/// Keys into the static message table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Msg {
	Title,
	Loading,
	LoadFailed,
	SignInRequired,
	Overview,
	Schemes,
	Family,
	Benefits,
	You,
	Age,
	Gender,
	Phone,
	District,
	NoSchemes,
	NoBenefits,
	Pinned,
	ResetLayout,
	GraphHint,
	SwitchLanguage,
}

impl Locale {
	pub fn code(self) -> &'static str {
		match self {
			Self::En => "en",
			Self::Hi => "hi",
		}
	}

	/// The other supported locale.
	pub fn toggled(self) -> Self {
		match self {
			Self::En => Self::Hi,
			Self::Hi => Self::En,
		}
	}

	/// Picks the secondary-locale variant of a name when one exists.
	pub fn pick<'a>(self, primary: &'a str, local: Option<&'a str>) -> &'a str {
		match (self, local) {
			(Self::Hi, Some(local)) if !local.trim().is_empty() => local,
			_ => primary,
		}
	}

	pub fn text(self, msg: Msg) -> &'static str {
		match self {
			Self::En => match msg {
				Msg::Title => "Citizen 360° Profile",
				Msg::Loading => "Loading profile…",
				Msg::LoadFailed => "Could not load your profile",
				Msg::SignInRequired => "Please sign in to view your profile.",
				Msg::Overview => "Overview",
				Msg::Schemes => "Enrolled schemes",
				Msg::Family => "Family",
				Msg::Benefits => "Benefits",
				Msg::You => "You",
				Msg::Age => "Age",
				Msg::Gender => "Gender",
				Msg::Phone => "Phone",
				Msg::District => "District",
				Msg::NoSchemes => "No enrolled schemes yet.",
				Msg::NoBenefits => "No benefit allocations found.",
				Msg::Pinned => "pinned",
				Msg::ResetLayout => "Reset layout",
				Msg::GraphHint => "Drag a member to pin it. Right-click to release.",
				Msg::SwitchLanguage => "हिन्दी",
			},
			Self::Hi => match msg {
				Msg::Title => "नागरिक 360° प्रोफ़ाइल",
				Msg::Loading => "प्रोफ़ाइल लोड हो रही है…",
				Msg::LoadFailed => "आपकी प्रोफ़ाइल लोड नहीं हो सकी",
				Msg::SignInRequired => "अपनी प्रोफ़ाइल देखने के लिए कृपया साइन इन करें।",
				Msg::Overview => "सारांश",
				Msg::Schemes => "नामांकित योजनाएँ",
				Msg::Family => "परिवार",
				Msg::Benefits => "लाभ",
				Msg::You => "आप",
				Msg::Age => "आयु",
				Msg::Gender => "लिंग",
				Msg::Phone => "फ़ोन",
				Msg::District => "ज़िला",
				Msg::NoSchemes => "अभी कोई नामांकित योजना नहीं है।",
				Msg::NoBenefits => "कोई लाभ आवंटन नहीं मिला।",
				Msg::Pinned => "पिन किए गए",
				Msg::ResetLayout => "लेआउट रीसेट करें",
				Msg::GraphHint => "पिन करने के लिए सदस्य को खींचें। छोड़ने के लिए राइट-क्लिक करें।",
				Msg::SwitchLanguage => "English",
			},
		}
	}
}
