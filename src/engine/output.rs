/// One piece of what a command produced. The front end decides how each kind looks.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputBlock {
    /// Heading for a new room.
    Title(String),
    Text(String),
    /// Outcome of a fight or a save.
    Event(String),
    /// Pre-drawn map rows, north first.
    Map(Vec<String>),
}

impl OutputBlock {
    fn is_blank(&self) -> bool {
        match self {
            OutputBlock::Title(s) | OutputBlock::Text(s) | OutputBlock::Event(s) => {
                s.trim().is_empty()
            }
            OutputBlock::Map(rows) => rows.is_empty(),
        }
    }

    fn plain(&self) -> String {
        match self {
            OutputBlock::Title(s) | OutputBlock::Text(s) | OutputBlock::Event(s) => s.clone(),
            OutputBlock::Map(rows) => rows.join("\n"),
        }
    }
}

/// Everything a single command has to show, in order. Blank blocks are dropped.
#[derive(Default, Debug)]
pub struct Output {
    pub blocks: Vec<OutputBlock>,
}

impl Output {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, block: OutputBlock) {
        if !block.is_blank() {
            self.blocks.push(block);
        }
    }

    pub fn title(&mut self, s: impl Into<String>) {
        self.push(OutputBlock::Title(s.into()));
    }

    pub fn say(&mut self, s: impl Into<String>) {
        self.push(OutputBlock::Text(s.into()));
    }

    pub fn event(&mut self, s: impl Into<String>) {
        self.push(OutputBlock::Event(s.into()));
    }

    pub fn map(&mut self, rows: Vec<String>) {
        self.push(OutputBlock::Map(rows));
    }

    /// Every block as plain lines, for tests and logs.
    pub fn text(&self) -> String {
        self.blocks
            .iter()
            .map(OutputBlock::plain)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
