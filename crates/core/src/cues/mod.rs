use serde::{Deserialize, Serialize};

use crate::Result;

/// One timestamped lyric line. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cue {
    pub timestamp_millis: u64,
    pub text: String,
}

impl Cue {
    pub fn new(timestamp_millis: u64, text: impl Into<String>) -> Self {
        Self {
            timestamp_millis,
            text: text.into(),
        }
    }
}

/// Ordered cue table, fixed at startup. Construction sorts the cues ascending
/// by timestamp so lookups can rely on the ordering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CueSheet {
    cues: Vec<Cue>,
}

impl CueSheet {
    pub fn from_cues(mut cues: Vec<Cue>) -> Self {
        cues.sort_by_key(|cue| cue.timestamp_millis);
        Self { cues }
    }

    pub fn cue(&self, index: usize) -> Option<&Cue> {
        self.cues.get(index)
    }

    pub fn len(&self) -> usize {
        self.cues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cues.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cue> {
        self.cues.iter()
    }

    /// Parses a cue sheet from a JSON array of `{timestamp_millis, text}`
    /// objects. The result is re-sorted, so unordered input is accepted.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let cues: Vec<Cue> = serde_json::from_str(json)?;
        Ok(Self::from_cues(cues))
    }

    /// Encodes the cue sheet as pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.cues)?)
    }

    /// The builtin greeting song, timestamps taken from the `.lrc` of the
    /// bundled recording.
    pub fn last_christmas() -> Self {
        let lines: [(u64, &str); 47] = [
            (17_460, "Last Christmas, I gave you my heart"),
            (21_690, "But the very next day you gave it away"),
            (26_180, "This year, to save me from tears"),
            (30_710, "I'll give it to someone special"),
            (35_450, "Last Christmas, I gave you my heart"),
            (39_710, "But the very next day you gave it away"),
            (44_710, "This year, to save me from tears"),
            (48_960, "I'll give it to someone special"),
            (72_210, "Once bitten and twice shy"),
            (76_450, "I keep my distance"),
            (77_960, "But you still catch my eye"),
            (81_460, "Tell me, baby"),
            (82_960, "Do you recognize me?"),
            (85_210, "Well, it's been a year"),
            (87_710, "It doesn't surprise me"),
            (91_210, "(Merry Christmas!) I wrapped it up and sent it"),
            (94_460, "With a note saying, \"I love you,\" I meant it"),
            (98_710, "Now, I know what a fool I've been"),
            (102_460, "But if you kissed me now"),
            (104_960, "I know you'd fool me again"),
            (107_670, "Last Christmas, I gave you my heart"),
            (111_170, "But the very next day you gave it away"),
            (113_960, "This year, to save me from tears"),
            (120_710, "I'll give it to someone special"),
            (125_720, "Last Christmas, I gave you my heart"),
            (129_460, "But the very next day you gave it away"),
            (138_960, "This year, to save me from tears"),
            (140_460, "I'll give it to someone special"),
            (161_960, "A crowded room, friends with tired eyes"),
            (166_710, "I'm hiding from you, and your soul of ice"),
            (171_210, "My god, I thought you were someone to rely on"),
            (174_960, "Me? I guess I was a shoulder to cry on"),
            (179_210, "A face on a lover with a fire in his heart"),
            (183_460, "A man under cover but you tore me apart"),
            (194_210, "Now, I've found a real love you'll never fool me again"),
            (197_460, "Last Christmas, I gave you my heart"),
            (201_210, "But the very next day you gave it away"),
            (206_710, "This year, to save me from tears"),
            (210_210, "I'll give it to someone special"),
            (215_210, "Last Christmas, I gave you my heart"),
            (218_940, "But the very next day you gave it away"),
            (223_930, "This year, to save me from tears"),
            (228_210, "I'll give it to someone special"),
            (233_460, "A face on a lover with a fire in his heart"),
            (237_210, "A man under cover but you tore him apart"),
            (244_210, "Maybe next year I'll give it to someone"),
            (248_700, "I'll give it to someone special"),
        ];

        Self::from_cues(
            lines
                .into_iter()
                .map(|(timestamp, text)| Cue::new(timestamp, text))
                .collect(),
        )
    }
}
