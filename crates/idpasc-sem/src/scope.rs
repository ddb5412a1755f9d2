//! The Wirth-style triple symbol table (§4.3): `tab` (identifiers), `btab`
//! (blocks), `atab` (arrays), a `display` stack of open block indices, and
//! the current lexical `level`.
//!
//! Every row lives in a growable, append-only [`IndexVec`] — no owning
//! pointers, no removal. Leaving a block only pops it off `display`; the
//! `tab` rows it chained stay put but become unreachable from
//! [`SymbolTable::find_identifier`] once no open block's chain still
//! points at them (§3 invariant 3).

use idpasc_util::{Idx, IndexVec, Symbol};

/// Index into `tab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TabId(u32);

impl Idx for TabId {
    fn from_usize(idx: usize) -> Self {
        TabId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into `btab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BlockId(u32);

impl Idx for BlockId {
    fn from_usize(idx: usize) -> Self {
        BlockId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Index into `atab`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArrId(u32);

impl Idx for ArrId {
    fn from_usize(idx: usize) -> Self {
        ArrId(idx as u32)
    }
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// `tab[i].obj` — what kind of thing an identifier names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjKind {
    Constant,
    Variable,
    Type,
    Procedure,
    Function,
    Program,
    /// Reserved-prefix padding for a structural grammar keyword (`jika`,
    /// `mulai`, …). These rows exist only to reserve the classic
    /// fixed-size Wirth prefix layout; `find_identifier` never resolves a
    /// source identifier to one, because the grammar always consumes
    /// these words directly as `Keyword` tokens, never as an `IDENT` in an
    /// identifier position.
    Keyword,
}

/// A compile-time constant's folded value, attached to a `CONSTANT` row
/// and to folded literal nodes in the decorated AST.
#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Int(i64),
    Real(f64),
    Bool(bool),
    Char(char),
    Str(String),
}

use crate::types::DataType;

impl ConstValue {
    pub fn data_type(&self) -> DataType {
        match self {
            ConstValue::Int(_) => DataType::Integer,
            ConstValue::Real(_) => DataType::Real,
            ConstValue::Bool(_) => DataType::Boolean,
            ConstValue::Char(_) => DataType::Char,
            ConstValue::Str(_) => DataType::String,
        }
    }

    /// The folded value as an integer, when meaningful — used for array
    /// bound and `for`-loop range folding (§4.4.6).
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ConstValue::Int(n) => Some(*n),
            _ => None,
        }
    }
}

/// One row of `tab`.
#[derive(Debug, Clone)]
pub struct TabEntry {
    pub name: Symbol,
    pub obj: ObjKind,
    pub data_type: DataType,
    /// Points into `atab` for `ARRAY`-typed rows; unused otherwise.
    pub reference: Option<ArrId>,
    /// `nrm=1`(true)/`nrm=0`(false): by-value vs by-reference. Scalar
    /// parameters are by value; array/record parameters are implicitly
    /// by reference, matching the historical Wirth convention that
    /// composite values are never copied into a parameter slot.
    pub normal: bool,
    pub level: u32,
    pub address: u32,
    /// Index of the previous identifier declared in the same block,
    /// forming the singly-linked chain; `0` terminates it (an index below
    /// [`SymbolTable::USER_ID_START`] is never itself chained further).
    pub link: usize,
    pub is_param: bool,
    /// For `PROCEDURE`/`FUNCTION` rows: the `btab` index of the
    /// subprogram's own block, set once that block is opened.
    pub block_index: Option<BlockId>,
    pub const_value: Option<ConstValue>,
    /// For `RECORD`-typed `TYPE` rows: field name/type pairs, in
    /// declaration order. Records are not otherwise resolved (§4.4.5) —
    /// this is just enough bookkeeping to remember a record type's shape
    /// without a fourth top-level table alongside `tab`/`btab`/`atab`.
    pub record_fields: Option<Vec<(Symbol, DataType)>>,
}

/// One row of `btab`.
#[derive(Debug, Clone, Default)]
pub struct BlockEntry {
    /// Head of this block's identifier chain; `0` means empty.
    pub last: usize,
    /// `tab` index of the identifier that names this block (the
    /// enclosing procedure/function/program), or `0` for none.
    pub lpar: usize,
    pub psze: u32,
    pub vsze: u32,
    pub param_count: u32,
    next_adr: u32,
}

/// One row of `atab`.
#[derive(Debug, Clone)]
pub struct ArrEntry {
    pub index_type: DataType,
    pub element_type: DataType,
    /// Set when `element_type == ARRAY`, chaining to the next dimension's
    /// `atab` row.
    pub eref: Option<ArrId>,
    pub low: i64,
    pub high: i64,
    pub element_size: u32,
    pub size: u32,
}

/// The triple symbol table plus the `display`/`level` scope-tracking
/// state (§4.3).
pub struct SymbolTable {
    pub tab: IndexVec<TabId, TabEntry>,
    pub btab: IndexVec<BlockId, BlockEntry>,
    pub atab: IndexVec<ArrId, ArrEntry>,
    pub display: Vec<BlockId>,
    pub level: u32,
}

impl SymbolTable {
    /// First index a user declaration may occupy; `tab[0..USER_ID_START)`
    /// is the reserved prefix (§3 invariant 1): indices `0..28` inclusive,
    /// 29 entries in all.
    pub const USER_ID_START: usize = 29;

    pub fn new() -> Self {
        let mut table = Self {
            tab: IndexVec::new(),
            btab: IndexVec::new(),
            atab: IndexVec::new(),
            display: Vec::new(),
            level: 0,
        };
        table.populate_reserved_prefix();
        debug_assert_eq!(table.tab.len(), Self::USER_ID_START);
        table
    }

    /// Pre-populate `tab[0..29)`: the five built-in types, the four
    /// built-in I/O procedures, and twenty structural-keyword placeholder
    /// rows (§9 — chosen to total exactly 29 without duplicating the
    /// lexer's separate reserved-word table; see `DESIGN.md`).
    fn populate_reserved_prefix(&mut self) {
        const BASE_TYPES: &[(&str, DataType)] = &[
            ("integer", DataType::Integer),
            ("real", DataType::Real),
            ("boolean", DataType::Boolean),
            ("char", DataType::Char),
            ("string", DataType::String),
        ];
        for (name, ty) in BASE_TYPES {
            self.push_reserved(name, ObjKind::Type, *ty);
        }

        const IO_PROCS: &[&str] = &["writeln", "readln", "write", "read"];
        for name in IO_PROCS {
            self.push_reserved(name, ObjKind::Procedure, DataType::Void);
        }

        const STRUCTURAL_KEYWORDS: &[&str] = &[
            "program", "variabel", "mulai", "selesai", "jika", "maka", "selainitu",
            "selama", "lakukan", "untuk", "ke", "turunke", "larik", "dari",
            "prosedur", "fungsi", "konstanta", "tipe", "kasus", "rekaman",
        ];
        for name in STRUCTURAL_KEYWORDS {
            self.push_reserved(name, ObjKind::Keyword, DataType::Void);
        }
    }

    fn push_reserved(&mut self, name: &str, obj: ObjKind, data_type: DataType) {
        self.tab.push(TabEntry {
            name: Symbol::intern(name),
            obj,
            data_type,
            reference: None,
            normal: true,
            level: 0,
            address: 0,
            link: 0,
            is_param: false,
            block_index: None,
            const_value: None,
            record_fields: None,
        });
    }

    /// Push a fresh block, open it at the next lexical level, and return
    /// its id.
    pub fn enter_block(&mut self) -> BlockId {
        let owner = self
            .display
            .last()
            .map(|b| self.btab[*b].last)
            .unwrap_or(0);
        let block = self.btab.push(BlockEntry {
            last: 0,
            lpar: owner,
            psze: 0,
            vsze: 0,
            param_count: 0,
            next_adr: 0,
        });
        self.display.push(block);
        self.level = self.display.len() as u32 - 1;
        block
    }

    /// Pop the innermost open block. Never underflows `level` below 0
    /// (§4.3).
    pub fn leave_block(&mut self) {
        self.display.pop();
        self.level = self.display.len().saturating_sub(1) as u32;
    }

    pub fn current_block(&self) -> Option<BlockId> {
        self.display.last().copied()
    }

    /// Allocate the next user index and append a row, threading it onto
    /// the current block's identifier chain. `size` is the element count
    /// in address units (1 for scalars; an array's `atab` entry carries
    /// its own byte-ish size independently).
    #[allow(clippy::too_many_arguments)]
    pub fn enter_identifier(
        &mut self,
        name: Symbol,
        obj: ObjKind,
        data_type: DataType,
        reference: Option<ArrId>,
        is_param: bool,
        size: u32,
        const_value: Option<ConstValue>,
    ) -> usize {
        let block = self.current_block().expect("enter_identifier with no open block");
        let idx = self.tab.len();

        let normal = !(is_param && matches!(data_type, DataType::Array | DataType::Record));

        let mut address = 0;
        if matches!(obj, ObjKind::Variable) {
            address = self.btab[block].next_adr;
            self.btab[block].next_adr += size.max(1);
            if is_param {
                self.btab[block].psze += size.max(1);
            } else {
                self.btab[block].vsze += size.max(1);
            }
        }

        let link = self.btab[block].last;
        self.tab.push(TabEntry {
            name,
            obj,
            data_type,
            reference,
            normal,
            level: self.level,
            address,
            link,
            is_param,
            block_index: None,
            const_value,
            record_fields: None,
        });
        self.btab[block].last = idx;
        if is_param {
            self.btab[block].param_count += 1;
        }
        idx
    }

    pub fn set_record_fields(&mut self, tab_idx: usize, fields: Vec<(Symbol, DataType)>) {
        self.tab[TabId::from_usize(tab_idx)].record_fields = Some(fields);
    }

    pub fn set_block_index(&mut self, tab_idx: usize, block: BlockId) {
        self.tab[TabId::from_usize(tab_idx)].block_index = Some(block);
    }

    /// Walk a block's identifier chain in declaration order, head being
    /// the most-recently-declared user identifier.
    fn chain(&self, block: BlockId) -> Vec<usize> {
        let mut out = Vec::new();
        let mut cur = self.btab[block].last;
        while cur >= Self::USER_ID_START {
            out.push(cur);
            cur = self.tab[TabId::from_usize(cur)].link;
        }
        out
    }

    /// Duplicate check: does `name` already appear in the *current*
    /// block's own chain (not outer scopes)?
    pub fn find_in_current_block(&self, name: Symbol) -> Option<usize> {
        let block = self.current_block()?;
        self.chain(block).into_iter().find(|&i| self.tab[TabId::from_usize(i)].name == name)
    }

    /// Resolve `name`: innermost open block outward, then the reserved
    /// prefix (§4.3).
    pub fn find_identifier(&self, name: Symbol) -> Option<usize> {
        for &block in self.display.iter().rev() {
            if let Some(i) = self.chain(block).into_iter().find(|&i| self.tab[TabId::from_usize(i)].name == name) {
                return Some(i);
            }
        }
        (0..Self::USER_ID_START).find(|&i| self.tab[TabId::from_usize(i)].name == name)
    }

    /// Parameter entries of a subprogram's block, in declaration order.
    pub fn collect_parameters(&self, block: BlockId) -> Vec<usize> {
        let mut params: Vec<usize> = self
            .chain(block)
            .into_iter()
            .filter(|&i| self.tab[TabId::from_usize(i)].is_param)
            .collect();
        params.reverse();
        params
    }

    pub fn enter_array(
        &mut self,
        index_type: DataType,
        element_type: DataType,
        eref: Option<ArrId>,
        low: i64,
        high: i64,
        element_size: u32,
    ) -> ArrId {
        let size = if high >= low {
            (high - low + 1) as u32 * element_size
        } else {
            0
        };
        self.atab.push(ArrEntry {
            index_type,
            element_type,
            eref,
            low,
            high,
            element_size,
            size,
        })
    }

    pub fn get_constant_value(&self, name: Symbol) -> Option<&ConstValue> {
        let idx = self.find_identifier(name)?;
        let entry = &self.tab[TabId::from_usize(idx)];
        if matches!(entry.obj, ObjKind::Constant) {
            entry.const_value.as_ref()
        } else {
            None
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
