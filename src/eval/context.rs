/// Value held by one tape cell.
///
/// Bytes under the default overflow policy; wider only with
/// [`OverflowPolicy::Unbounded`](crate::config::OverflowPolicy::Unbounded).
pub type Cell = u32;

/// Complete mutable state of a single run.
///
/// Created fresh for every execution and handed back to the caller when the
/// program finishes, so nothing is shared between runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    tape: Vec<Cell>,
    pointer: usize,
    input: Vec<char>,
    cursor: usize,
    output: String,
    register: Option<Cell>,
    steps: u64,
}

impl ExecutionContext {
    /// The tape always has at least one cell.
    pub fn new(tape_len: usize, input: &str) -> Self {
        Self {
            tape: vec![0; tape_len.max(1)],
            pointer: 0,
            input: input.chars().collect(),
            cursor: 0,
            output: String::new(),
            register: None,
            steps: 0,
        }
    }

    pub fn tape(&self) -> &[Cell] {
        &self.tape
    }

    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Index of the next unread input character.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn into_output(self) -> String {
        self.output
    }

    pub fn register(&self) -> Option<Cell> {
        self.register
    }

    /// Instructions executed so far.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn tape_len(&self) -> usize {
        self.tape.len()
    }

    pub fn current(&self) -> Cell {
        self.tape[self.pointer]
    }

    pub(crate) fn set_current(&mut self, value: Cell) {
        self.tape[self.pointer] = value;
    }

    pub(crate) fn set_pointer(&mut self, pointer: usize) {
        debug_assert!(pointer < self.tape.len());
        self.pointer = pointer;
    }

    pub(crate) fn take_register(&mut self) -> Option<Cell> {
        self.register.take()
    }

    pub(crate) fn set_register(&mut self, value: Cell) {
        self.register = Some(value);
    }

    pub(crate) fn tick(&mut self) {
        self.steps += 1;
    }

    /// Stores the next input character (code point mod 256) in the current
    /// cell, or 0 once input is exhausted. The cursor never passes the end.
    pub(crate) fn read_input(&mut self) {
        let value = match self.input.get(self.cursor) {
            Some(c) => {
                self.cursor += 1;
                *c as Cell % 256
            }
            None => 0,
        };
        self.set_current(value);
    }

    /// Appends the current cell as a character.
    pub(crate) fn write_output(&mut self) -> char {
        let c = cell_to_char(self.current());
        self.output.push(c);
        c
    }
}

/// Latin-1 for byte values; U+FFFD for values that are not Unicode scalars.
pub fn cell_to_char(value: Cell) -> char {
    char::from_u32(value).unwrap_or(char::REPLACEMENT_CHARACTER)
}
