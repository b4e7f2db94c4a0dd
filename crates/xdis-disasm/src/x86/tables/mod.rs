//! Opcode dispatch tables.
//!
//! Every opcode map is a 256-entry root array of [`NodeId`]s into one shared
//! node arena. Interior nodes split on a decode-time field (ModRM.reg, the
//! mandatory prefix, vector length, W, mode or an option) until the walk
//! reaches a [`Handler`] leaf or the explicit [`Node::Invalid`] sentinel.
//! Node 0 is always the sentinel, so a slot nobody filled in is invalid
//! rather than missing.
//!
//! The arena is built once on first use and never mutated afterwards.

mod d3now;
mod evex;
mod legacy;
mod map0f;
mod map0f38;
mod map0f3a;
mod ops;
mod vex;
mod x87;
mod xop;

use std::collections::HashMap;
use std::sync::OnceLock;

use xdis_core::{Element, EncodingKind, Mnemonic};

use super::context::DecodeContext;
use super::handlers::{Attr, Handler, VAttr, VOp};
use super::size::SizePolicy;
use super::state::StateFlags;
use crate::error::DecodeError;
use crate::options::OptionKind;

pub use d3now::d3now_mnemonic;

/// Index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// The invalid sentinel.
    pub const INVALID: NodeId = NodeId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Opcode map selected by the escape bytes or the VEX/XOP/EVEX map field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Map {
    Legacy,
    M0F,
    M0F38,
    M0F3A,
    Vex0F,
    Vex0F38,
    Vex0F3A,
    Xop8,
    Xop9,
    XopA,
    Evex0F,
    Evex0F38,
    Evex0F3A,
}

impl Map {
    /// Every map, in root-table order.
    pub const ALL: [Map; 13] = [
        Map::Legacy,
        Map::M0F,
        Map::M0F38,
        Map::M0F3A,
        Map::Vex0F,
        Map::Vex0F38,
        Map::Vex0F3A,
        Map::Xop8,
        Map::Xop9,
        Map::XopA,
        Map::Evex0F,
        Map::Evex0F38,
        Map::Evex0F3A,
    ];

    fn index(self) -> usize {
        self as usize
    }
}

/// One node of the dispatch arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    Invalid,
    Leaf(Handler),
    /// Keyed by ModRM.reg.
    Group([NodeId; 8]),
    /// Register (mod == 3) or memory form.
    RegMem { reg: NodeId, mem: NodeId },
    /// Memory forms keyed by ModRM.reg, register forms by the whole ModRM
    /// byte (index into the wide table arena).
    Group8x64 { low: [NodeId; 8], high: u32 },
    /// Keyed by none/66/F3/F2.
    MandatoryPrefix([NodeId; 4]),
    /// Keyed by VEX.L or EVEX.L'L.
    VectorLength([NodeId; 4]),
    /// Keyed by REX.W, VEX.W, XOP.W or EVEX.W.
    W([NodeId; 2]),
    /// 64-bit mode versus 16/32-bit mode.
    Bitness { b64: NodeId, other: NodeId },
    /// Switches on one decoder option.
    Option {
        option: OptionKind,
        enabled: NodeId,
        disabled: NodeId,
    },
    /// Hint-space opcode: anything `other` leaves undefined decodes as a
    /// reserved NOP.
    ReservedNop { reserved: NodeId, other: NodeId },
    /// Reads the next byte and continues in another map.
    Escape(Map),
}

/// The immutable dispatch tables.
#[derive(Debug)]
pub struct Tables {
    nodes: Vec<Node>,
    wide: Vec<[NodeId; 64]>,
    roots: Vec<[NodeId; 256]>,
}

static TABLES: OnceLock<Tables> = OnceLock::new();

/// Returns the process-wide tables, building them on first use.
pub fn tables() -> &'static Tables {
    TABLES.get_or_init(build)
}

fn build() -> Tables {
    let mut b = TableBuilder::new();
    let mut roots = Vec::with_capacity(Map::ALL.len());
    for map in Map::ALL {
        let root = match map {
            Map::Legacy => legacy::build(&mut b),
            Map::M0F => map0f::build(&mut b),
            Map::M0F38 => map0f38::build(&mut b),
            Map::M0F3A => map0f3a::build(&mut b),
            Map::Vex0F => vex::build_0f(&mut b),
            Map::Vex0F38 => vex::build_0f38(&mut b),
            Map::Vex0F3A => vex::build_0f3a(&mut b),
            Map::Xop8 => xop::build_8(&mut b),
            Map::Xop9 => xop::build_9(&mut b),
            Map::XopA => xop::build_a(&mut b),
            Map::Evex0F => evex::build_0f(&mut b),
            Map::Evex0F38 => evex::build_0f38(&mut b),
            Map::Evex0F3A => evex::build_0f3a(&mut b),
        };
        roots.push(root);
    }
    let tables = Tables {
        nodes: b.nodes,
        wide: b.wide,
        roots,
    };
    tracing::debug!(
        nodes = tables.nodes.len(),
        wide = tables.wide.len(),
        leaves = b.leaves.len(),
        "built x86 opcode tables"
    );
    tables
}

/// Resolves `opcode` in `map` to a handler, reading ModRM and further
/// escape bytes as the walk requires. Returns the handler and the last
/// opcode byte read.
pub fn resolve(cx: &mut DecodeContext<'_>, map: Map, opcode: u8) -> Result<(Handler, u8), DecodeError> {
    let tables = tables();
    match tables.walk(cx, tables.root(map, opcode), opcode)? {
        Some(found) => Ok(found),
        None => Err(cx.invalid()),
    }
}

impl Tables {
    /// Root entry of `map` for `opcode`.
    pub fn root(&self, map: Map, opcode: u8) -> NodeId {
        self.roots
            .get(map.index())
            .map_or(NodeId::INVALID, |root| root[opcode as usize])
    }

    /// Number of nodes in the arena.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn node(&self, id: NodeId) -> Node {
        self.nodes.get(id.index()).copied().unwrap_or(Node::Invalid)
    }

    /// Returns whether every reference in the arena names an existing node
    /// and every root covers its 256 opcodes. A walk over total tables ends
    /// in a leaf or the sentinel for every input.
    pub fn is_total(&self) -> bool {
        let valid = |id: &NodeId| id.index() < self.nodes.len();
        if self.nodes.first() != Some(&Node::Invalid) || self.roots.len() != Map::ALL.len() {
            return false;
        }
        let roots_ok = self.roots.iter().all(|root| root.iter().all(valid));
        let wide_ok = self.wide.iter().all(|t| t.iter().all(valid));
        let nodes_ok = self.nodes.iter().enumerate().all(|(i, node)| {
            let children: &[NodeId] = match node {
                Node::Invalid | Node::Leaf(_) | Node::Escape(_) => &[],
                Node::Group(t) => t,
                Node::RegMem { reg, mem } => return valid(reg) && valid(mem) && reg.index() != i,
                Node::Group8x64 { low, high } => {
                    return low.iter().all(valid) && (*high as usize) < self.wide.len();
                }
                Node::MandatoryPrefix(t) | Node::VectorLength(t) => t,
                Node::W(t) => t,
                Node::Bitness { b64, other } => return valid(b64) && valid(other),
                Node::Option { enabled, disabled, .. } => return valid(enabled) && valid(disabled),
                Node::ReservedNop { reserved, other } => return valid(reserved) && valid(other),
            };
            children.iter().all(valid)
        });
        roots_ok && wide_ok && nodes_ok
    }

    fn walk(
        &self,
        cx: &mut DecodeContext<'_>,
        mut id: NodeId,
        mut opcode: u8,
    ) -> Result<Option<(Handler, u8)>, DecodeError> {
        loop {
            id = match self.node(id) {
                Node::Invalid => return Ok(None),
                Node::Leaf(handler) => return Ok(Some((handler, opcode))),
                Node::Group(t) => t[cx.modrm()?.reg as usize],
                Node::RegMem { reg, mem } => {
                    if cx.modrm()?.is_register() {
                        reg
                    } else {
                        mem
                    }
                }
                Node::Group8x64 { low, high } => {
                    let modrm = cx.modrm()?;
                    if modrm.is_register() {
                        match self.wide.get(high as usize) {
                            Some(t) => t[(modrm.byte - 0xC0) as usize],
                            None => NodeId::INVALID,
                        }
                    } else {
                        low[modrm.reg as usize]
                    }
                }
                Node::MandatoryPrefix(t) => {
                    let index = cx.state.mandatory_prefix.index();
                    let next = t[index];
                    if cx.state.encoding == EncodingKind::Legacy && next != t[0] {
                        if index == 1 {
                            cx.state.consume_operand_size_prefix();
                        } else {
                            cx.state.flags.insert(StateFlags::REP_CONSUMED);
                        }
                    }
                    next
                }
                Node::VectorLength(t) => {
                    let mut index = cx.state.vector_length as usize & 3;
                    // With EVEX.b on a register form L'L is the rounding mode.
                    if cx.state.encoding == EncodingKind::Evex
                        && cx.state.flags.contains(StateFlags::EVEX_B)
                        && cx.modrm()?.is_register()
                    {
                        index = 2;
                    }
                    t[index]
                }
                Node::W(t) => t[cx.state.w as usize],
                Node::Bitness { b64, other } => {
                    if cx.state.is_64bit() {
                        b64
                    } else {
                        other
                    }
                }
                Node::Option {
                    option,
                    enabled,
                    disabled,
                } => {
                    if cx.options.is_set(option) {
                        enabled
                    } else {
                        disabled
                    }
                }
                Node::ReservedNop { reserved, other } => {
                    if cx.options.force_reserved_nop {
                        reserved
                    } else {
                        let saved = cx.state.flags;
                        if let Some(found) = self.walk(cx, other, opcode)? {
                            return Ok(Some(found));
                        }
                        cx.state.flags = saved;
                        cx.state.update_sizes();
                        reserved
                    }
                }
                Node::Escape(map) => {
                    opcode = cx.cursor.read_u8()?;
                    self.root(map, opcode)
                }
            };
        }
    }
}

/// Arena builder used by the per-map table modules.
pub(crate) struct TableBuilder {
    nodes: Vec<Node>,
    wide: Vec<[NodeId; 64]>,
    leaves: HashMap<Handler, NodeId>,
}

impl TableBuilder {
    fn new() -> Self {
        Self {
            nodes: vec![Node::Invalid],
            wide: Vec::new(),
            leaves: HashMap::new(),
        }
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Leaf for `handler`; identical handlers share one node.
    pub fn leaf(&mut self, handler: Handler) -> NodeId {
        if let Some(id) = self.leaves.get(&handler) {
            return *id;
        }
        let id = self.push(Node::Leaf(handler));
        self.leaves.insert(handler, id);
        id
    }

    /// Leaf for an operand-less instruction.
    pub fn simple(&mut self, m: Mnemonic) -> NodeId {
        self.leaf(Handler::Simple { m })
    }

    /// Leaf for a vector form without EVEX features.
    pub fn vec(&mut self, m: Mnemonic, ops: &'static [VOp], elem: Element) -> NodeId {
        self.evec(m, ops, elem, VAttr::empty())
    }

    /// Leaf for a vector form with the given EVEX features.
    pub fn evec(&mut self, m: Mnemonic, ops: &'static [VOp], elem: Element, attr: VAttr) -> NodeId {
        self.leaf(Handler::Vector { m, ops, elem, attr })
    }

    pub fn group(&mut self, t: [NodeId; 8]) -> NodeId {
        if t.iter().all(|id| *id == NodeId::INVALID) {
            return NodeId::INVALID;
        }
        self.push(Node::Group(t))
    }

    pub fn reg_mem(&mut self, reg: NodeId, mem: NodeId) -> NodeId {
        if reg == mem {
            return reg;
        }
        self.push(Node::RegMem { reg, mem })
    }

    /// Memory form only.
    pub fn mem(&mut self, mem: NodeId) -> NodeId {
        self.reg_mem(NodeId::INVALID, mem)
    }

    /// Register form only.
    pub fn reg(&mut self, reg: NodeId) -> NodeId {
        self.reg_mem(reg, NodeId::INVALID)
    }

    /// Group whose register forms are dispatched on the whole ModRM byte.
    /// Register forms missing from `high` fall back to `low[reg]`.
    pub fn group8x64(&mut self, low: [NodeId; 8], high: &[(u8, NodeId)]) -> NodeId {
        let mut wide = [NodeId::INVALID; 64];
        for (i, slot) in wide.iter_mut().enumerate() {
            *slot = low[(i >> 3) & 7];
        }
        for &(modrm, id) in high {
            if modrm >= 0xC0 {
                wide[(modrm - 0xC0) as usize] = id;
            }
        }
        let high = self.wide.len() as u32;
        self.wide.push(wide);
        self.push(Node::Group8x64 { low, high })
    }

    /// Mandatory prefix split, in none/66/F3/F2 order.
    pub fn mp(&mut self, t: [NodeId; 4]) -> NodeId {
        if t.iter().all(|id| *id == t[0]) {
            return t[0];
        }
        self.push(Node::MandatoryPrefix(t))
    }

    pub fn pnone(&mut self, id: NodeId) -> NodeId {
        self.mp([id, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID])
    }

    pub fn p66(&mut self, id: NodeId) -> NodeId {
        self.mp([NodeId::INVALID, id, NodeId::INVALID, NodeId::INVALID])
    }

    pub fn pf3(&mut self, id: NodeId) -> NodeId {
        self.mp([NodeId::INVALID, NodeId::INVALID, id, NodeId::INVALID])
    }

    pub fn pf2(&mut self, id: NodeId) -> NodeId {
        self.mp([NodeId::INVALID, NodeId::INVALID, NodeId::INVALID, id])
    }

    /// Vector length split, in 128/256/512/reserved order.
    pub fn vl(&mut self, t: [NodeId; 4]) -> NodeId {
        if t.iter().all(|id| *id == t[0]) {
            return t[0];
        }
        self.push(Node::VectorLength(t))
    }

    /// VEX.L0 only.
    pub fn l0(&mut self, id: NodeId) -> NodeId {
        self.vl([id, NodeId::INVALID, NodeId::INVALID, NodeId::INVALID])
    }

    /// VEX.L0 or L1, never 512 bits.
    pub fn l01(&mut self, id: NodeId) -> NodeId {
        self.vl([id, id, NodeId::INVALID, NodeId::INVALID])
    }

    /// W split, in W0/W1 order.
    pub fn w(&mut self, w0: NodeId, w1: NodeId) -> NodeId {
        if w0 == w1 {
            return w0;
        }
        self.push(Node::W([w0, w1]))
    }

    pub fn w0(&mut self, id: NodeId) -> NodeId {
        self.w(id, NodeId::INVALID)
    }

    pub fn w1(&mut self, id: NodeId) -> NodeId {
        self.w(NodeId::INVALID, id)
    }

    pub fn bitness(&mut self, b64: NodeId, other: NodeId) -> NodeId {
        if b64 == other {
            return b64;
        }
        self.push(Node::Bitness { b64, other })
    }

    /// Invalid in 64-bit mode.
    pub fn not64(&mut self, id: NodeId) -> NodeId {
        self.bitness(NodeId::INVALID, id)
    }

    /// Valid only in 64-bit mode.
    pub fn only64(&mut self, id: NodeId) -> NodeId {
        self.bitness(id, NodeId::INVALID)
    }

    pub fn option(&mut self, option: OptionKind, enabled: NodeId, disabled: NodeId) -> NodeId {
        if enabled == disabled {
            return enabled;
        }
        self.push(Node::Option {
            option,
            enabled,
            disabled,
        })
    }

    /// Hint-space opcode backed by `other`.
    pub fn reserved_nop(&mut self, other: NodeId) -> NodeId {
        let reserved = self.leaf(Handler::EG {
            m: Mnemonic::ReservedNop,
            size: SizePolicy::Default,
            attr: Attr::empty(),
        });
        self.push(Node::ReservedNop { reserved, other })
    }

    pub fn escape(&mut self, map: Map) -> NodeId {
        self.push(Node::Escape(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::DecoderOptions;
    use xdis_core::Bitness;

    fn resolve_bytes(
        bitness: Bitness,
        options: DecoderOptions,
        map: Map,
        bytes: &[u8],
    ) -> Result<(Handler, u8), DecodeError> {
        let mut cx = DecodeContext::new(bytes, 0, 0, bitness, options);
        let opcode = cx.cursor.read_u8()?;
        resolve(&mut cx, map, opcode)
    }

    #[test]
    fn test_tables_are_total() {
        let tables = tables();
        assert!(tables.is_total());
        assert!(tables.node_count() > 1000);
    }

    #[test]
    fn test_sentinel_is_node_zero() {
        assert_eq!(tables().node(NodeId::INVALID), Node::Invalid);
    }

    #[test]
    fn test_group_dispatch() {
        let (h, opcode) =
            resolve_bytes(Bitness::Bits32, DecoderOptions::new(), Map::Legacy, &[0x83, 0xC0]).unwrap();
        assert_eq!(opcode, 0x83);
        assert!(matches!(h, Handler::EImm { m: Mnemonic::Add, .. }));
        let (h, _) =
            resolve_bytes(Bitness::Bits32, DecoderOptions::new(), Map::Legacy, &[0x83, 0xF8]).unwrap();
        assert!(matches!(h, Handler::EImm { m: Mnemonic::Cmp, .. }));
    }

    #[test]
    fn test_escape_to_0f38() {
        let (h, opcode) =
            resolve_bytes(Bitness::Bits64, DecoderOptions::new(), Map::Legacy, &[0x0F, 0x38, 0x00, 0xC1])
                .unwrap();
        assert_eq!(opcode, 0x00);
        assert!(matches!(h, Handler::Vector { m: Mnemonic::Pshufb, .. }));
    }

    #[test]
    fn test_mode_split() {
        let opts = DecoderOptions::new();
        assert!(resolve_bytes(Bitness::Bits64, opts, Map::Legacy, &[0x37]).is_err());
        let (h, _) = resolve_bytes(Bitness::Bits32, opts, Map::Legacy, &[0x37]).unwrap();
        assert_eq!(h, Handler::Simple { m: Mnemonic::Aaa });
    }

    #[test]
    fn test_option_split() {
        let bytes = [0x0F, 0x0A];
        assert!(resolve_bytes(Bitness::Bits32, DecoderOptions::new(), Map::Legacy, &bytes).is_err());
        let opts = DecoderOptions::new().with_cl1invmb(true);
        let (h, _) = resolve_bytes(Bitness::Bits32, opts, Map::Legacy, &bytes).unwrap();
        assert_eq!(h, Handler::Simple { m: Mnemonic::Cl1invmb });
    }

    #[test]
    fn test_reserved_nop_fallback() {
        // 0F 19 has no architectural meaning at all.
        let (h, _) =
            resolve_bytes(Bitness::Bits32, DecoderOptions::new(), Map::Legacy, &[0x0F, 0x19, 0x00]).unwrap();
        assert!(matches!(h, Handler::EG { m: Mnemonic::ReservedNop, .. }));
        // 0F 18 /0 is PREFETCHNTA unless forced.
        let (h, _) =
            resolve_bytes(Bitness::Bits32, DecoderOptions::new(), Map::Legacy, &[0x0F, 0x18, 0x00]).unwrap();
        assert!(matches!(h, Handler::M { m: Mnemonic::Prefetchnta, .. }));
        let forced = DecoderOptions::new().with_force_reserved_nop(true);
        let (h, _) = resolve_bytes(Bitness::Bits32, forced, Map::Legacy, &[0x0F, 0x18, 0x00]).unwrap();
        assert!(matches!(h, Handler::EG { m: Mnemonic::ReservedNop, .. }));
    }

    #[test]
    fn test_mandatory_prefix_consumes_66() {
        let bytes = [0x66, 0x0F, 0x58, 0xC1];
        let mut cx = DecodeContext::new(&bytes, 0, 0, Bitness::Bits32, DecoderOptions::new());
        let (map, opcode) = crate::x86::prefix::scan(&mut cx.cursor, &mut cx.state).unwrap();
        let (h, _) = resolve(&mut cx, map, opcode).unwrap();
        assert!(matches!(h, Handler::Vector { m: Mnemonic::Addpd, .. }));
        assert!(cx.state.flags.contains(StateFlags::P66_CONSUMED));
        assert!(!cx.state.has_operand_size_prefix());
    }

    #[test]
    fn test_66_is_operand_size_when_not_mandatory() {
        // POPCNT takes F3 as mandatory; 66 stays an operand-size prefix.
        let bytes = [0x66, 0xF3, 0x0F, 0xB8, 0xC1];
        let mut cx = DecodeContext::new(&bytes, 0, 0, Bitness::Bits32, DecoderOptions::new());
        let (map, opcode) = crate::x86::prefix::scan(&mut cx.cursor, &mut cx.state).unwrap();
        let (h, _) = resolve(&mut cx, map, opcode).unwrap();
        assert!(matches!(h, Handler::GE { m: Mnemonic::Popcnt, .. }));
        assert!(cx.state.has_operand_size_prefix());
        assert!(cx.state.flags.contains(StateFlags::REP_CONSUMED));
    }
}
