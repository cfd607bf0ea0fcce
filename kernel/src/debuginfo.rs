//! Instruction-address debug info
//!
//! `backtrace` annotates each return address with the enclosing function,
//! source file and line. The lookup service is behind [`SymbolResolver`];
//! [`SymbolTable`] is a minimal implementation over a sorted static table,
//! which is what a build step emitting symbols into the image produces.
//!
//! Function names follow the stabs convention: the stored string may carry a
//! type suffix (`mon_backtrace:F(0,25)`), and only the first
//! `function_name_len` bytes are the name proper.

/// Result of resolving one instruction address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebugInfo<'a> {
    pub file: &'a str,
    pub line: u32,
    /// Raw name; may continue past the name proper
    pub function_name: &'a str,
    /// Length of the name proper within `function_name`
    pub function_name_len: usize,
    pub function_start: usize,
}

impl DebugInfo<'_> {
    /// The function name cut to its reported length.
    pub fn name(&self) -> &str {
        let len = self.function_name_len.min(self.function_name.len());
        self.function_name.get(..len).unwrap_or(self.function_name)
    }

    /// Byte offset of `addr` from the function's first instruction.
    pub fn offset_of(&self, addr: usize) -> usize {
        addr.wrapping_sub(self.function_start)
    }
}

/// Debug-info lookup service
pub trait SymbolResolver {
    /// Debug info for the function containing `addr`, or `None`.
    fn resolve(&self, addr: usize) -> Option<DebugInfo<'_>>;
}

/// Source line starting at `offset` bytes into a function
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRecord {
    pub offset: usize,
    pub line: u32,
}

/// One function in a [`SymbolTable`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FunctionSymbol {
    /// Stabs-style name, e.g. `i386_init:F(0,25)`
    pub name: &'static str,
    pub file: &'static str,
    pub start: usize,
    pub size: usize,
    /// Sorted by `offset`
    pub lines: &'static [LineRecord],
}

impl FunctionSymbol {
    fn contains(&self, addr: usize) -> bool {
        addr >= self.start && addr - self.start < self.size
    }

    /// Line of the last record at or before `addr`; 0 if there is none.
    fn line_at(&self, addr: usize) -> u32 {
        let offset = addr - self.start;
        let idx = self.lines.partition_point(|rec| rec.offset <= offset);
        idx.checked_sub(1).map_or(0, |i| self.lines[i].line)
    }
}

/// Sorted, non-overlapping table of functions
#[derive(Debug, Clone, Copy)]
pub struct SymbolTable {
    functions: &'static [FunctionSymbol],
}

impl SymbolTable {
    pub const EMPTY: SymbolTable = SymbolTable { functions: &[] };

    /// Validate and wrap a function table.
    pub fn new(functions: &'static [FunctionSymbol]) -> Result<Self, &'static str> {
        for pair in functions.windows(2) {
            if pair[0].start.saturating_add(pair[0].size) > pair[1].start {
                return Err("symbol table is unsorted or has overlapping functions");
            }
        }
        for function in functions {
            if function.lines.windows(2).any(|w| w[0].offset > w[1].offset) {
                return Err("line records are not sorted by offset");
            }
        }
        Ok(Self { functions })
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl SymbolResolver for SymbolTable {
    fn resolve(&self, addr: usize) -> Option<DebugInfo<'_>> {
        let idx = self.functions.partition_point(|f| f.start <= addr);
        let function = &self.functions[idx.checked_sub(1)?];
        if !function.contains(addr) {
            return None;
        }
        Some(DebugInfo {
            file: function.file,
            line: function.line_at(addr),
            function_name: function.name,
            function_name_len: function.name.find(':').unwrap_or(function.name.len()),
            function_start: function.start,
        })
    }
}
