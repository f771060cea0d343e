//! Card model: edges, orientations and the matching rule.
//!
//! A card carries four edges in clockwise order (top, right, bottom, left).
//! Rotating a card never mutates it; it yields a transient view with the
//! edge slots cyclically shifted.

/// Index of a color in the owning puzzle's color alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color(pub u8);

/// One of the two complementary roles an edge can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Polarity {
    Head,
    Tail,
}

impl Polarity {
    /// Returns the only polarity this one matches against.
    #[inline]
    pub const fn complement(self) -> Self {
        match self {
            Polarity::Head => Polarity::Tail,
            Polarity::Tail => Polarity::Head,
        }
    }
}

/// A (color, polarity) pair on one side of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Edge {
    pub color: Color,
    pub polarity: Polarity,
}

impl Edge {
    pub const fn new(color: Color, polarity: Polarity) -> Self {
        Self { color, polarity }
    }

    /// Two edges may touch iff they share a color and have opposite polarity.
    #[inline(always)]
    pub fn matches(self, other: Edge) -> bool {
        self.color == other.color && self.polarity == other.polarity.complement()
    }
}

/// Side of a card, in clockwise order starting at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Top,
    Right,
    Bottom,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Top,
        Direction::Right,
        Direction::Bottom,
        Direction::Left,
    ];

    /// Slot of this side in a card's edge array.
    #[inline(always)]
    pub const fn index(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::Right => 1,
            Direction::Bottom => 2,
            Direction::Left => 3,
        }
    }

    /// The side facing this one on a neighboring card.
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Top => Direction::Bottom,
            Direction::Right => Direction::Left,
            Direction::Bottom => Direction::Top,
            Direction::Left => Direction::Right,
        }
    }
}

/// Number of clockwise quarter turns applied to a card (0..=3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Orientation(u8);

impl Orientation {
    pub const IDENTITY: Self = Self(0);

    /// All four orientations in try order.
    pub const ALL: [Orientation; 4] = [Self(0), Self(1), Self(2), Self(3)];

    /// Creates an orientation from any number of quarter turns (taken mod 4).
    pub const fn new(quarter_turns: usize) -> Self {
        Self((quarter_turns % 4) as u8)
    }

    pub const fn quarter_turns(self) -> usize {
        self.0 as usize
    }
}

/// Position of a card in its puzzle's card list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CardId(pub usize);

/// A square card with four edges, indexed by [`Direction::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub id: CardId,
    pub edges: [Edge; 4],
}

impl Card {
    pub const fn new(id: CardId, edges: [Edge; 4]) -> Self {
        Self { id, edges }
    }

    /// Effective edge facing `direction` once the card is turned by `orientation`.
    ///
    /// Each clockwise quarter turn moves the left edge to the top, so the
    /// edge now facing slot `d` originally sat at slot `d - k`.
    #[inline(always)]
    pub fn edge(&self, orientation: Orientation, direction: Direction) -> Edge {
        self.edges[(direction.index() + 4 - orientation.quarter_turns()) % 4]
    }

    /// All four effective edges under `orientation`, clockwise from the top.
    pub fn edges_under(&self, orientation: Orientation) -> [Edge; 4] {
        Direction::ALL.map(|direction| self.edge(orientation, direction))
    }

    /// Returns a copy of this card turned clockwise by `orientation`.
    pub fn rotated(&self, orientation: Orientation) -> Card {
        Card::new(self.id, self.edges_under(orientation))
    }
}
