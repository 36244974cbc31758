use rand::Rng;
use std::fmt;
use thiserror::Error;

/// Traversal cost along a path. Costs are paid on entering a cell.
pub type Cost = u32;

/// Sentinel cost for cells no search has reached.
pub const UNREACHABLE: Cost = Cost::MAX;

/// Default start cell, used whenever it fits inside the grid.
pub const DEFAULT_START: Position = Position { row: 10, col: 10 };
/// Default target cell, used whenever it fits inside the grid.
pub const DEFAULT_TARGET: Position = Position { row: 15, col: 55 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Manhattan distance between two positions.
    pub fn manhattan(&self, other: &Position) -> Cost {
        (self.row.abs_diff(other.row) + self.col.abs_diff(other.col)) as Cost
    }
}

/// Terrain of a cell. Heavy terrain costs more to enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Weight {
    #[default]
    Normal,
    Heavy,
}

impl Weight {
    pub const NORMAL_COST: Cost = 1;
    pub const HEAVY_COST: Cost = 5;

    pub fn cost(self) -> Cost {
        match self {
            Weight::Normal => Self::NORMAL_COST,
            Weight::Heavy => Self::HEAVY_COST,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Normal,
    Start,
    Target,
    Wall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellState {
    #[default]
    Unvisited,
    Visited,
    Path,
}

/// A single square of the grid.
///
/// Identity (`row`, `col`, `index`) never changes. Role, terrain and
/// visitation state are independent of each other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    col: usize,
    index: usize,
    terrain: Weight,
    role: Role,
    state: CellState,
}

impl Cell {
    fn new(row: usize, col: usize, index: usize) -> Self {
        Cell {
            row,
            col,
            index,
            terrain: Weight::Normal,
            role: Role::Normal,
            state: CellState::Unvisited,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// Linear index, `row * cols + col`.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn position(&self) -> Position {
        Position::new(self.row, self.col)
    }

    /// Cost of stepping onto this cell.
    pub fn weight(&self) -> Cost {
        self.terrain.cost()
    }

    pub fn terrain(&self) -> Weight {
        self.terrain
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn is_wall(&self) -> bool {
        self.role == Role::Wall
    }

    pub fn is_start(&self) -> bool {
        self.role == Role::Start
    }

    pub fn is_target(&self) -> bool {
        self.role == Role::Target
    }

    pub fn visit(&mut self) {
        self.state = CellState::Visited;
    }

    pub fn travel(&mut self) {
        self.state = CellState::Path;
    }

    fn reset(&mut self) {
        self.terrain = Weight::Normal;
        self.role = Role::Normal;
        self.state = CellState::Unvisited;
    }

    fn glyph(&self) -> char {
        match (self.role, self.state, self.terrain) {
            (Role::Start, _, _) => 'S',
            (Role::Target, _, _) => 'T',
            (Role::Wall, _, _) => '#',
            (_, CellState::Path, _) => '*',
            (_, CellState::Visited, _) => 'o',
            (_, _, Weight::Heavy) => '~',
            _ => '.',
        }
    }
}

/// Read-only view of a grid that search algorithms run against.
pub trait Board {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;
    fn start(&self) -> Option<&Cell>;
    fn target(&self) -> Option<&Cell>;
    /// Bounds-checked lookup. Out-of-range coordinates yield `None`.
    fn node(&self, row: isize, col: isize) -> Option<&Cell>;
    fn node_by_index(&self, index: usize) -> Option<&Cell>;

    fn cell_count(&self) -> usize {
        self.rows() * self.cols()
    }
}

/// Mutation entry points used by animation playback.
pub trait Canvas {
    fn visit(&mut self, index: usize);
    fn travel(&mut self, index: usize);
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    #[error("grid must hold at least two cells, got {rows}x{cols}")]
    TooSmall { rows: usize, cols: usize },
    #[error("position ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
    #[error("start and target must be different cells")]
    SameEndpoints,
    #[error("cannot place a wall on the start or target cell")]
    EndpointOccupied,
    #[error("layout row {row} has {found} columns, expected {expected}")]
    RaggedLayout {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("unknown layout symbol {symbol:?} at ({row}, {col})")]
    UnknownSymbol { symbol: char, row: usize, col: usize },
    #[error("layout must contain exactly one start and one target")]
    EndpointCount,
}

#[derive(Debug, Clone)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
    start: Position,
    target: Position,
}

impl Grid {
    /// Builds an empty grid with the default start and target.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        let (start, target) = Self::default_endpoints(rows, cols);
        Self::with_endpoints(rows, cols, start, target)
    }

    pub fn with_endpoints(
        rows: usize,
        cols: usize,
        start: Position,
        target: Position,
    ) -> Result<Self, GridError> {
        if rows.saturating_mul(cols) < 2 {
            return Err(GridError::TooSmall { rows, cols });
        }
        let cells = (0..rows * cols)
            .map(|index| Cell::new(index / cols, index % cols, index))
            .collect();
        let mut grid = Grid {
            rows,
            cols,
            cells,
            start,
            target,
        };
        let start_index = grid.index_of(start)?;
        let target_index = grid.index_of(target)?;
        if start_index == target_index {
            return Err(GridError::SameEndpoints);
        }
        grid.cells[start_index].role = Role::Start;
        grid.cells[target_index].role = Role::Target;
        Ok(grid)
    }

    /// Parses a layout where `S` is the start, `T` the target, `#` a wall,
    /// `~` heavy terrain and `.` a normal cell. Blank lines are ignored.
    pub fn from_layout(layout: &str) -> Result<Self, GridError> {
        let lines: Vec<Vec<char>> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| line.chars().collect())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, Vec::len);

        let mut start = None;
        let mut target = None;
        let mut walls = Vec::new();
        let mut heavy = Vec::new();
        for (row, line) in lines.iter().enumerate() {
            if line.len() != cols {
                return Err(GridError::RaggedLayout {
                    row,
                    expected: cols,
                    found: line.len(),
                });
            }
            for (col, &symbol) in line.iter().enumerate() {
                let pos = Position::new(row, col);
                match symbol {
                    'S' if start.is_none() => start = Some(pos),
                    'T' if target.is_none() => target = Some(pos),
                    'S' | 'T' => return Err(GridError::EndpointCount),
                    '#' => walls.push(pos),
                    '~' => heavy.push(pos),
                    '.' => {}
                    _ => return Err(GridError::UnknownSymbol { symbol, row, col }),
                }
            }
        }

        let (Some(start), Some(target)) = (start, target) else {
            return Err(GridError::EndpointCount);
        };
        let mut grid = Self::with_endpoints(rows, cols, start, target)?;
        for pos in walls {
            grid.set_wall(pos, true)?;
        }
        for pos in heavy {
            grid.set_weight(pos, Weight::Heavy)?;
        }
        Ok(grid)
    }

    /// Endpoints a blank `rows × cols` grid starts with.
    pub fn default_endpoints(rows: usize, cols: usize) -> (Position, Position) {
        let fits = |pos: Position| pos.row < rows && pos.col < cols;
        if fits(DEFAULT_START) && fits(DEFAULT_TARGET) {
            (DEFAULT_START, DEFAULT_TARGET)
        } else {
            (
                Position::new(0, 0),
                Position::new(rows.saturating_sub(1), cols.saturating_sub(1)),
            )
        }
    }

    fn index_of(&self, pos: Position) -> Result<usize, GridError> {
        if self.contains(pos) {
            Ok(pos.row * self.cols + pos.col)
        } else {
            Err(GridError::OutOfBounds {
                row: pos.row,
                col: pos.col,
            })
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cell(&self, pos: Position) -> Option<&Cell> {
        self.index_of(pos).ok().map(|index| &self.cells[index])
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn start_position(&self) -> Position {
        self.start
    }

    pub fn target_position(&self) -> Position {
        self.target
    }

    /// Moves the start to `pos`. The previous start becomes a normal cell.
    pub fn set_start(&mut self, pos: Position) -> Result<(), GridError> {
        self.move_endpoint(pos, Role::Start)
    }

    /// Moves the target to `pos`. The previous target becomes a normal cell.
    pub fn set_target(&mut self, pos: Position) -> Result<(), GridError> {
        self.move_endpoint(pos, Role::Target)
    }

    fn move_endpoint(&mut self, pos: Position, role: Role) -> Result<(), GridError> {
        let index = self.index_of(pos)?;
        let (current, other) = match role {
            Role::Start => (self.start, self.target),
            _ => (self.target, self.start),
        };
        if pos == other {
            return Err(GridError::SameEndpoints);
        }
        let previous = self.index_of(current)?;
        self.cells[previous].role = Role::Normal;
        self.cells[index].role = role;
        if role == Role::Start {
            self.start = pos;
        } else {
            self.target = pos;
        }
        Ok(())
    }

    pub fn set_wall(&mut self, pos: Position, wall: bool) -> Result<(), GridError> {
        let index = self.index_of(pos)?;
        let cell = &mut self.cells[index];
        if cell.is_start() || cell.is_target() {
            return Err(GridError::EndpointOccupied);
        }
        cell.role = if wall { Role::Wall } else { Role::Normal };
        Ok(())
    }

    /// Flips a cell between wall and normal. Returns whether it is now a wall.
    pub fn toggle_wall(&mut self, pos: Position) -> Result<bool, GridError> {
        let wall = !self.cell(pos).is_some_and(Cell::is_wall);
        self.set_wall(pos, wall)?;
        Ok(wall)
    }

    pub fn set_weight(&mut self, pos: Position, weight: Weight) -> Result<(), GridError> {
        let index = self.index_of(pos)?;
        self.cells[index].terrain = weight;
        Ok(())
    }

    /// Returns every cell to unvisited, keeping roles and terrain.
    pub fn clear_states(&mut self) {
        for cell in &mut self.cells {
            cell.state = CellState::Unvisited;
        }
    }

    /// Restores a blank grid with the default endpoints.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.reset();
        }
        let (start, target) = Self::default_endpoints(self.rows, self.cols);
        self.start = start;
        self.target = target;
        self.cells[start.row * self.cols + start.col].role = Role::Start;
        self.cells[target.row * self.cols + target.col].role = Role::Target;
    }

    /// Randomly places walls and heavy terrain on normal cells, never on the
    /// endpoints. Returns how many walls and heavy cells were placed.
    pub fn scatter<R: Rng>(&mut self, rng: &mut R, walls: usize, weights: usize) -> (usize, usize) {
        let mut walls_placed = 0;
        let mut attempts = 0;
        while walls_placed < walls && attempts < walls * 3 {
            let index = rng.gen_range(0..self.cells.len());
            let cell = &mut self.cells[index];
            if cell.role == Role::Normal {
                cell.role = Role::Wall;
                walls_placed += 1;
            }
            attempts += 1;
        }

        let mut weights_placed = 0;
        attempts = 0;
        while weights_placed < weights && attempts < weights * 3 {
            let index = rng.gen_range(0..self.cells.len());
            let cell = &mut self.cells[index];
            if cell.role == Role::Normal && cell.terrain == Weight::Normal {
                cell.terrain = Weight::Heavy;
                weights_placed += 1;
            }
            attempts += 1;
        }
        (walls_placed, weights_placed)
    }

    /// Print a visual representation of the grid with row and column headers
    pub fn print_grid(&self) {
        println!("Legend: S=Start, T=Target, #=Wall, ~=Heavy, o=Visited, *=Path, .=Empty");

        print!("   ");
        for col in 0..self.cols {
            print!("{}", col % 10);
        }
        println!();

        for row in 0..self.rows {
            print!("{:2} ", row);
            let line: String = self.cells[row * self.cols..(row + 1) * self.cols]
                .iter()
                .map(Cell::glyph)
                .collect();
            println!("{}", line);
        }
        println!();
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols) {
            let line: String = row.iter().map(Cell::glyph).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl Board for Grid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn cols(&self) -> usize {
        self.cols
    }

    fn start(&self) -> Option<&Cell> {
        self.cell(self.start)
    }

    fn target(&self) -> Option<&Cell> {
        self.cell(self.target)
    }

    fn node(&self, row: isize, col: isize) -> Option<&Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cell(Position::new(row as usize, col as usize))
    }

    fn node_by_index(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }
}

impl Canvas for Grid {
    fn visit(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.visit();
        }
    }

    fn travel(&mut self, index: usize) {
        if let Some(cell) = self.cells.get_mut(index) {
            cell.travel();
        }
    }
}
