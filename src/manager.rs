//! The process wide owner of the current maze.
//!
//! One writer publishes whole generations, any number of readers query them. A generation is
//! built without holding any lock and the lock is only taken to swap the `Arc` pointer, so a
//! reader sees either the old maze or the new one, never a mix.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::thread;

use log::info;

use crate::cells::{Cell, PassageSmallVec};
use crate::config::MazeConfig;
use crate::errors::*;
use crate::maze_graph::MazeGraph;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum ManagerState {
    Uninitialized,
    Ready,
}

#[derive(Debug)]
struct Published {
    maze: Arc<MazeGraph>,
    request: u64,
}

#[derive(Debug, Default)]
pub struct MazeManager {
    current: RwLock<Option<Published>>,
    requests: AtomicU64,
}

impl MazeManager {
    pub fn new() -> MazeManager {
        MazeManager::default()
    }

    /// Generate a perfect maze and make it the current one. On error the previously published
    /// maze, if any, stays current.
    pub fn create_maze(&self, width: i32, height: i32, seed: u64) -> Result<()> {
        self.create_maze_with(&MazeConfig::new(width, height, seed))
    }

    pub fn create_maze_with(&self, config: &MazeConfig) -> Result<()> {
        let request = self.next_request();
        let maze = MazeGraph::generate_with(config)?;
        self.publish(request, maze, &AtomicBool::new(false));
        Ok(())
    }

    /// Generate on a background thread. Readers keep using the current maze until the new one
    /// is published.
    pub fn spawn_create_maze(manager: &Arc<MazeManager>, config: MazeConfig) -> GenerationHandle {
        let request = manager.next_request();
        let cancelled = Arc::new(AtomicBool::new(false));

        let worker = {
            let manager = Arc::clone(manager);
            let cancelled = Arc::clone(&cancelled);
            thread::spawn(move || {
                let maze = MazeGraph::generate_with(&config)?;
                Ok(manager.publish(request, maze, &cancelled))
            })
        };

        GenerationHandle { cancelled, worker }
    }

    /// The passage flags of the cell at column `x`, row `y` of the current maze.
    pub fn get_maze_position(&self, x: i32, y: i32) -> Result<Cell> {
        self.snapshot()?.cell_at(x, y)
    }

    pub fn neighbours_of(&self, x: i32, y: i32) -> Result<PassageSmallVec> {
        self.snapshot()?.neighbours_of(x, y)
    }

    /// Width of the current maze, 0 before the first one is created.
    pub fn width(&self) -> usize {
        self.snapshot().map(|maze| maze.width()).unwrap_or(0)
    }

    /// Height of the current maze, 0 before the first one is created.
    pub fn height(&self) -> usize {
        self.snapshot().map(|maze| maze.height()).unwrap_or(0)
    }

    /// Width and height read from the same maze. Separate `width()` and `height()` calls can
    /// straddle a publish and mix two generations.
    pub fn dimensions(&self) -> (usize, usize) {
        self.snapshot().map(|maze| (maze.width(), maze.height())).unwrap_or((0, 0))
    }

    pub fn state(&self) -> ManagerState {
        if self.read_current(|published| published.is_some()) {
            ManagerState::Ready
        } else {
            ManagerState::Uninitialized
        }
    }

    /// The current maze. Holding on to it keeps that generation alive and unchanged across many
    /// lookups, even if a newer maze is published meanwhile.
    pub fn snapshot(&self) -> Result<Arc<MazeGraph>> {
        self.read_current(|published| published.as_ref().map(|p| Arc::clone(&p.maze)))
            .ok_or_else(|| ErrorKind::NotInitialized.into())
    }

    fn next_request(&self) -> u64 {
        self.requests.fetch_add(1, Ordering::SeqCst) + 1
    }

    // The guarded value is a single pointer that is always whole, so a poisoned lock is still
    // safe to use.
    fn read_current<T, F>(&self, f: F) -> T
        where F: FnOnce(&Option<Published>) -> T
    {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    /// Swap in `maze` unless the build was cancelled or a later request has already been
    /// published. The cancel flag is read under the write lock, so a cancel that lands before
    /// the swap always wins.
    fn publish(&self, request: u64, maze: MazeGraph, cancelled: &AtomicBool) -> bool {
        let (width, height, seed) = (maze.width(), maze.height(), maze.seed());
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);

        if cancelled.load(Ordering::SeqCst) {
            info!("discarding cancelled {}x{} maze (request {})", width, height, request);
            return false;
        }

        if let Some(ref published) = *guard {
            if published.request > request {
                info!("request {} superseded by request {}, not publishing",
                      request,
                      published.request);
                return false;
            }
        }

        *guard = Some(Published {
            maze: Arc::new(maze),
            request,
        });
        info!("published {}x{} maze (seed {}, request {})", width, height, seed, request);
        true
    }
}

/// A background generation started by `MazeManager::spawn_create_maze`.
#[derive(Debug)]
pub struct GenerationHandle {
    cancelled: Arc<AtomicBool>,
    worker: thread::JoinHandle<Result<bool>>,
}

impl GenerationHandle {
    /// The maze is still built but thrown away instead of being published. Has no effect once
    /// the maze has been published.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_finished(&self) -> bool {
        self.worker.is_finished()
    }

    /// Wait for the build. `Ok(true)` when the maze became the current one.
    pub fn join(self) -> Result<bool> {
        match self.worker.join() {
            Ok(result) => result,
            Err(_) => bail!(ErrorKind::GenerationAborted),
        }
    }
}
